#[macro_use]
pub(crate) mod macros {
    macro_rules! impl_setter {
        ($self:ident, $field:ident, $type:ty) => {
            pub fn $field(mut $self, $field: $type) -> Self {
                $self.$field = $field;
                $self
            }
        }
    }
}

pub(crate) mod datastructures;
pub(crate) use datastructures::BitSet;

pub mod clique;
pub mod degeneracy;
pub mod error;
pub mod graph;
pub mod io;
pub mod logging;
pub mod vc;

pub use clique::{MaxClique, MaxCliqueBuilder, MaxCliqueResult};
pub use error::Error;
