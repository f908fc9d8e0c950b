//! Bedroom entitlement under the size criteria for private renters

use crate::profile::{ChildGender, ChildrenDetails, Circumstances};

/// Children under this age may share regardless of gender
const MIXED_SHARING_AGE: u32 = 10;

#[derive(Debug, Clone, Copy)]
struct Occupant {
    age: u32,
    gender: ChildGender,
}

impl Occupant {
    fn can_share_with(&self, other: &Occupant) -> bool {
        self.gender == other.gender
            || (self.age < MIXED_SHARING_AGE && other.age < MIXED_SHARING_AGE)
    }
}

/// Bedrooms for the adults; a couple shares one room
fn adult_bedrooms(circumstances: Circumstances) -> u32 {
    match circumstances {
        Circumstances::Single | Circumstances::Couple => 1,
    }
}

/// Number of bedrooms the household is entitled to.
///
/// Children are taken youngest first; each ungrouped child opens a room and
/// takes the first later child it can share with. This first-fit order is
/// not always the minimum and must not be replaced by an optimal packing.
/// Missing ages count as 0 and missing genders as unknown.
pub fn calculate_bedroom_entitlement(
    circumstances: Circumstances,
    children: &ChildrenDetails,
) -> u32 {
    let adults = adult_bedrooms(circumstances);

    match children.count {
        0 => return adults,
        1 => return adults + 1,
        _ => {}
    }

    let mut occupants: Vec<Occupant> = (0..children.count as usize)
        .map(|i| Occupant {
            age: children.age_of(i),
            gender: children.gender_of(i),
        })
        .collect();
    occupants.sort_by_key(|o| o.age);

    let mut grouped = vec![false; occupants.len()];
    let mut rooms = 0;

    for i in 0..occupants.len() {
        if grouped[i] {
            continue;
        }
        grouped[i] = true;
        rooms += 1;

        if let Some(j) = (i + 1..occupants.len())
            .find(|&j| !grouped[j] && occupants[i].can_share_with(&occupants[j]))
        {
            grouped[j] = true;
        }
    }

    log::debug!("bedroom entitlement: {} adult + {} child room(s)", adults, rooms);
    adults + rooms
}
