mod fit;
mod paginate;
mod types;

pub use fit::{FitPlan, FitStrategy, compute_fit};
pub use paginate::{paginate, paginate_non_empty};
pub use types::*;
