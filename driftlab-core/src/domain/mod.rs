//! Domain types: bars, validated price series, equity curves.

pub mod bar;
pub mod equity;
pub mod series;

pub use bar::Bar;
pub use equity::EquityCurve;
pub use series::PriceSeries;
