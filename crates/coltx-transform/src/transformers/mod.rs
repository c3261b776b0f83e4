//! Concrete transformers.
//!
//! Each type here is a [`Kernel`](crate::Kernel) with constructors that pair
//! it with the matching [`Shape`](crate::Shape):
//!
//! | Kind | Shape |
//! |---|---|
//! | `AbsDiffColumn` | two-to-one |
//! | `Cast`, `InplaceCast` | n-to-n |
//! | `ColumnSelection` | n-to-none |
//! | `CopyColumn` | one-to-one |
//! | `CopyColumns` | n-to-n |
//! | `DropNullColumn`, `DropNullRow` | n-to-none |
//! | `Function` | n-to-none |
//! | `GreaterEqual` | n-to-n |
//! | `MeanHorizontal`, `SumHorizontal` | n-to-one |
//! | `Replace` | one-to-one |
//! | scalers and their `Inplace` variants | n-to-n |
//! | `StringToTime`, `InplaceStringToTime` | n-to-n |
//! | `StripChars`, `InplaceStripChars` | n-to-n |

mod abs_diff;
mod cast;
mod compare;
mod copy;
mod function;
mod horizontal;
mod null;
mod replace;
mod scaler;
mod selection;
mod string;
mod time;

pub use abs_diff::AbsDiffColumn;
pub use cast::{Cast, parse_dtype};
pub use compare::GreaterEqual;
pub use copy::{CopyColumn, CopyColumns};
pub use function::Function;
pub use horizontal::{MeanHorizontal, SumHorizontal};
pub use null::{DropNullColumn, DropNullRow};
pub use replace::Replace;
pub use scaler::Scaler;
pub use selection::ColumnSelector;
pub use string::StripChars;
pub use time::StringToTime;
