//! Render color palette.

/// Pick the color for the `index`-th document of a batch.
///
/// Returns `None` only for an empty palette.
///
/// # Examples
///
/// ```
/// use itinera_core::color_for;
///
/// let palette = ["blue", "red", "green"];
/// assert_eq!(color_for(&palette, 0), Some("blue"));
/// assert_eq!(color_for(&palette, 3), Some("blue"));
/// assert_eq!(color_for(&palette, 4), Some("red"));
/// assert_eq!(color_for::<&str>(&[], 4), None);
/// ```
pub fn color_for<S: AsRef<str>>(palette: &[S], index: usize) -> Option<&str> {
    if palette.is_empty() {
        return None;
    }
    Some(palette[index % palette.len()].as_ref())
}
