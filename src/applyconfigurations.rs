//! Declarative apply configurations: sparse, optional-field representations of
//! API objects, built with chained `with_*` calls and submitted with
//! server-side apply.

pub mod meta {
    pub mod v1;
}
pub mod core {
    pub mod v1;
}
pub mod events {
    pub mod v1beta1;
}
