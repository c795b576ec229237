use crate::error::Result;
use crate::space::{StateSpace, Vertex};

/// Parses an array of string slices into a `StateSpace`.
///
/// Each string slice is one vertex, in id order starting from 0. Whitespace
/// inside a slice is ignored, so `"A B 0 1"` and `"AB01"` are the same vertex.
/// The alphabet of the resulting space is the smallest one that spells every
/// vertex (e.g. vertices using `A`..`C` and `0`..`1` give 3 letters and 2 digits).
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`), one per vertex.
///
/// # Returns
/// * `Ok(StateSpace)` if parsing is successful.
/// * `Err(Error)` if:
///     - A vertex has an odd length, or a symbol outside `A`-`I` in its first
///       half or outside `0`-`8` in its second half.
///     - Vertices differ in length, or the same vertex appears twice.
///     - Fewer than 3 vertices are given.
///
/// # Examples
/// ```
/// use pile_search::utils::space_from_str_array;
///
/// let space = space_from_str_array(&["A0", "B0", "A1"]).unwrap();
/// assert_eq!(space.len(), 3);
/// assert_eq!(space.vertices()[2].to_string(), "A1");
///
/// assert!(space_from_str_array(&["A0", "B0", "B0"]).is_err());
/// assert!(space_from_str_array(&["A0", "B0", "0A"]).is_err());
/// ```
pub fn space_from_str_array(s: &[&str]) -> Result<StateSpace> {
    let vertices = s
        .iter()
        .map(|text| Vertex::parse(text))
        .collect::<Result<Vec<_>>>()?;
    StateSpace::from_vertices(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_space_from_str_array_valid() {
        let space = space_from_str_array(&["AB01", "BA10", "CC22", "AA00"]).unwrap();
        assert_eq!(space.len(), 4);
        assert_eq!(space.config().letters(), 3);
        assert_eq!(space.config().digits(), 3);
        assert_eq!(space.config().length(), 4);
        assert_eq!(space.vertices()[1].to_string(), "BA10");
    }

    #[test]
    fn test_space_from_str_array_with_spaces() {
        let space = space_from_str_array(&["A 0", " B 0", "A 1 "]).unwrap();
        assert_eq!(space.vertices()[1].to_string(), "B0");
    }

    #[test]
    fn test_space_from_str_array_invalid_char() {
        let result = space_from_str_array(&["A0", "B0", "X1"]);
        match result {
            Err(Error::InvalidVertex { text, reason }) => {
                assert_eq!(text, "X1");
                assert!(reason.contains("unexpected symbol 'X'"));
            }
            other => panic!("expected InvalidVertex, got {:?}", other),
        }
    }

    #[test]
    fn test_space_from_str_array_odd_length() {
        let err = space_from_str_array(&["A0", "B0", "A"]).unwrap_err();
        assert!(err.to_string().contains("even, non-zero length"));
    }

    #[test]
    fn test_space_from_str_array_too_few_vertices() {
        let err = space_from_str_array(&["A0", "B0"]).unwrap_err();
        assert!(matches!(err, Error::Configuration { parameter: "N", .. }));
    }

    #[test]
    fn test_space_from_str_array_empty_input() {
        assert!(space_from_str_array(&[]).is_err());
    }
}
