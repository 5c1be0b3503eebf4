/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Millis(pub f64); // milliseconds

impl Millis {
    /// Elapsed milliseconds since `earlier`. Negative when `earlier` is in
    /// the future.
    pub fn since(self, earlier: Millis) -> f64 {
        self.0 - earlier.0
    }
}
