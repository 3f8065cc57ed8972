#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use spatium_math as math;

#[doc(inline)]
pub use spatium_geo as geo;

#[doc(inline)]
pub use spatium_grid as grid;

#[doc(inline)]
pub use spatium_stats as stats;

#[doc(inline)]
pub use spatium_shapes as shapes;
