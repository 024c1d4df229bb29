pub mod availability;
pub mod placement;
pub mod slots;

pub use availability::{
    bookable_slots, build_availability, merge_availability, professional_availability,
    specialty_availability,
};
pub use placement::{day_placements, is_slot_occupied, resolve};
pub use slots::{slot_sequence, SlotSequence};
