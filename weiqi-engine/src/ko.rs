use serde::{Deserialize, Serialize};

use crate::point::Point;
use crate::stone::Stone;

/// A point that may not be played on the next move, recorded with the colour
/// that just lost the single stone there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ko {
    pub pos: Point,
    pub illegal: Stone,
}
