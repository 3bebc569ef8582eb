//! Named polynomial slots shared by every flavor.
//!
//! The same containers hold commitments (verification key, proof), claimed
//! evaluations (sumcheck output) and, in the reference prover, the
//! polynomial tables themselves.

macro_rules! define_entities {
    ($(#[$meta:meta])* $name:ident { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name<T> {
            $(pub $field: T,)+
        }

        impl<T> $name<T> {
            pub const LEN: usize = [$(stringify!($field)),+].len();

            pub fn get_all(&self) -> Vec<&T> {
                vec![$(&self.$field),+]
            }

            pub fn get_all_mut(&mut self) -> Vec<&mut T> {
                vec![$(&mut self.$field),+]
            }

            pub fn into_vec(self) -> Vec<T> {
                vec![$(self.$field),+]
            }

            pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> $name<U> {
                $name {
                    $($field: f(&self.$field),)+
                }
            }

            /// Builds the container from exactly `LEN` items in field order.
            pub fn from_iter_exact<I: IntoIterator<Item = T>>(iter: I) -> Option<Self> {
                let mut iter = iter.into_iter();
                let entities = $name {
                    $($field: iter.next()?,)+
                };
                iter.next().is_none().then_some(entities)
            }
        }
    };
}

define_entities!(
    /// Circuit-defining polynomials fixed by the verification key.
    PrecomputedEntities {
        q_m,
        q_c,
        q_l,
        q_r,
        q_o,
        q_4,
        q_arith,
        q_delta_range,
        sigma_1,
        sigma_2,
        sigma_3,
        sigma_4,
        id_1,
        id_2,
        id_3,
        id_4,
        lagrange_first,
        lagrange_last,
    }
);

define_entities!(
    /// Prover-committed polynomials. All of them are also opened shifted.
    WitnessEntities {
        w_l,
        w_r,
        w_o,
        w_4,
        z_perm,
    }
);

define_entities!(
    /// Every entity a relation reads: precomputed, then witness, then the
    /// witness polynomials shifted by one row.
    AllEntities {
        q_m,
        q_c,
        q_l,
        q_r,
        q_o,
        q_4,
        q_arith,
        q_delta_range,
        sigma_1,
        sigma_2,
        sigma_3,
        sigma_4,
        id_1,
        id_2,
        id_3,
        id_4,
        lagrange_first,
        lagrange_last,
        w_l,
        w_r,
        w_o,
        w_4,
        z_perm,
        w_l_shift,
        w_r_shift,
        w_o_shift,
        w_4_shift,
        z_perm_shift,
    }
);

pub const NUM_PRECOMPUTED_ENTITIES: usize = PrecomputedEntities::<()>::LEN;
pub const NUM_WITNESS_ENTITIES: usize = WitnessEntities::<()>::LEN;
pub const NUM_SHIFTED_ENTITIES: usize = NUM_WITNESS_ENTITIES;
pub const NUM_ALL_ENTITIES: usize = AllEntities::<()>::LEN;

impl<T> AllEntities<T> {
    pub fn from_parts(
        precomputed: PrecomputedEntities<T>,
        witness: WitnessEntities<T>,
        shifted: WitnessEntities<T>,
    ) -> Self {
        let items = precomputed
            .into_vec()
            .into_iter()
            .chain(witness.into_vec())
            .chain(shifted.into_vec());
        Self::from_iter_exact(items)
            .unwrap_or_else(|| unreachable!("entity groups have fixed lengths"))
    }

    pub fn precomputed(&self) -> Vec<&T> {
        self.get_all()
            .into_iter()
            .take(NUM_PRECOMPUTED_ENTITIES)
            .collect()
    }

    pub fn witness(&self) -> Vec<&T> {
        self.get_all()
            .into_iter()
            .skip(NUM_PRECOMPUTED_ENTITIES)
            .take(NUM_WITNESS_ENTITIES)
            .collect()
    }

    pub fn shifted(&self) -> Vec<&T> {
        self.get_all()
            .into_iter()
            .skip(NUM_PRECOMPUTED_ENTITIES + NUM_WITNESS_ENTITIES)
            .collect()
    }

    /// Entities opened at the sumcheck point as they are.
    pub fn unshifted(&self) -> Vec<&T> {
        self.get_all()
            .into_iter()
            .take(NUM_PRECOMPUTED_ENTITIES + NUM_WITNESS_ENTITIES)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_counts() {
        assert_eq!(NUM_PRECOMPUTED_ENTITIES, 18);
        assert_eq!(NUM_WITNESS_ENTITIES, 5);
        assert_eq!(NUM_ALL_ENTITIES, 28);
    }

    #[test]
    fn groups_follow_field_order() {
        let all = AllEntities::from_iter_exact(0..NUM_ALL_ENTITIES).unwrap();
        assert_eq!(all.q_m, 0);
        assert_eq!(all.lagrange_last, 17);
        assert_eq!(all.w_l, 18);
        assert_eq!(all.z_perm_shift, 27);
        assert_eq!(*all.witness()[4], all.z_perm);
        assert_eq!(*all.shifted()[0], all.w_l_shift);

        let rebuilt = AllEntities::from_parts(
            PrecomputedEntities::from_iter_exact(0..18).unwrap(),
            WitnessEntities::from_iter_exact(18..23).unwrap(),
            WitnessEntities::from_iter_exact(23..28).unwrap(),
        );
        assert_eq!(rebuilt, all);
    }

    #[test]
    fn exact_length_is_enforced() {
        assert!(WitnessEntities::from_iter_exact(0..4).is_none());
        assert!(WitnessEntities::from_iter_exact(0..6).is_none());
    }
}
