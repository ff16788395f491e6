pub mod consts;
pub mod conj;
pub mod error;
pub mod ops;
pub mod snapshot;
pub mod three_phase;
pub mod transform;
pub mod wye_delta;

pub use consts::{ALPHA, ALPHA2};
pub use conj::Conjugate;
pub use error::{Result, TransformError};
pub use ops::{Direction, Operand};
pub use snapshot::{Component, ExportOptions, Form, KeyStyle, Snapshot, Value};
pub use three_phase::ThreePhase;
pub use wye_delta::{DeltaSum, WyeDelta, WyeDeltaConfig};
