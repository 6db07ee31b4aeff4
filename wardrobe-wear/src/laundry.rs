//! Laundry status transitions

use wardrobe_core::{Garment, LaundryStatus};

/// Hand a dirty garment to the cleaner. Other statuses are left alone.
pub fn send_to_cleaning(garment: &Garment) -> Garment {
    let mut updated = garment.clone();
    if updated.laundry_status == LaundryStatus::Dirty {
        updated.laundry_status = LaundryStatus::Cleaning;
    }
    updated
}

/// Back in the closet with a fresh wear budget.
pub fn mark_clean(garment: &Garment) -> Garment {
    let mut updated = garment.clone();
    updated.laundry_status = LaundryStatus::Closet;
    updated.current_wears = 0;
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_core::{GarmentCategory, GarmentId};

    fn denim(status: LaundryStatus) -> Garment {
        Garment::new(GarmentId::now_v7(), "denim", GarmentCategory::Denim)
            .with_wears(5, 5)
            .with_laundry_status(status)
    }

    #[test]
    fn test_dirty_goes_to_cleaning() {
        let cleaned = send_to_cleaning(&denim(LaundryStatus::Dirty));
        assert_eq!(cleaned.laundry_status, LaundryStatus::Cleaning);
        assert_eq!(cleaned.current_wears, 5);
    }

    #[test]
    fn test_closet_is_not_sent_to_cleaning() {
        let item = denim(LaundryStatus::Closet);
        assert_eq!(send_to_cleaning(&item), item);
    }

    #[test]
    fn test_mark_clean_resets_wears() {
        for status in [LaundryStatus::Dirty, LaundryStatus::Cleaning, LaundryStatus::Unknown] {
            let clean = mark_clean(&denim(status));
            assert_eq!(clean.laundry_status, LaundryStatus::Closet);
            assert_eq!(clean.current_wears, 0);
            assert_eq!(clean.remaining_uses(), 5);
        }
    }
}
