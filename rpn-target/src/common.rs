pub use anyhow::{ensure, format_err, Result};
pub use getset::{CopyGetters, Getters};
pub use itertools::{iproduct, izip, Itertools as _};
pub use log::debug;
pub use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, Axis};
pub use noisy_float::prelude::*;
pub use rand::{prelude::*, rngs::StdRng};
pub use serde::{Deserialize, Serialize};
