//! Container disambiguation: decides whether a segment addresses an array
//! slot or an object key.

use crate::parser::Segment;
use crate::util::is_integer;
use crate::value::{ContainerKind, Value};
use crate::PathError;

/// A segment resolved against its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    Index(usize),
    Key(&'a str),
}

impl Step<'_> {
    /// The container kind this step requires of its parent.
    pub fn container(&self) -> ContainerKind {
        match self {
            Step::Index(_) => ContainerKind::Array,
            Step::Key(_) => ContainerKind::Object,
        }
    }
}

/// Resolves `segment` given the kind of the container it is applied to
/// (`None` when the parent is missing or a scalar).
///
/// | Segment                     | Parent         | Step  |
/// |-----------------------------|----------------|-------|
/// | `[n]` unquoted integer      | any            | index |
/// | `["k"]`, `[k]` non-numeric  | any            | key   |
/// | `.n` numeric name           | array          | index |
/// | `.n` numeric name           | object/missing | key   |
/// | `.k` non-numeric name       | any            | key   |
///
/// # Errors
///
/// - `InvalidIndex` for a negative or fractional bracket index, or one
///   above [`MAX_ARRAY_INDEX`]
/// - `UnresolvableIndex` for a dynamic segment
pub fn classify(segment: &Segment, parent: Option<ContainerKind>) -> Result<Step<'_>, PathError> {
    match segment {
        Segment::Index(raw) => parse_index(raw).map(Step::Index),
        Segment::Field(name) if parent == Some(ContainerKind::Array) && is_integer(name) => {
            parse_index(name).map(Step::Index)
        }
        Segment::Field(name) | Segment::Quoted(name) | Segment::Key(name) => Ok(Step::Key(name)),
        Segment::Dynamic(expr) => Err(PathError::UnresolvableIndex(expr.clone())),
    }
}

/// Largest addressable array index: `2^32 - 2`, so that the length still
/// fits in a `u32`.
pub const MAX_ARRAY_INDEX: usize = u32::MAX as usize - 1;

fn parse_index(raw: &str) -> Result<usize, PathError> {
    if !is_integer(raw) {
        return Err(PathError::InvalidIndex(raw.to_string()));
    }
    raw.parse()
        .ok()
        .filter(|idx| *idx <= MAX_ARRAY_INDEX)
        .ok_or_else(|| PathError::InvalidIndex(raw.to_string()))
}

/// Creates the container a missing intermediate needs so that `next` can be
/// applied to it: an array for a bracketed numeric segment, an object for
/// anything else. A numeric dot segment gets an object, since there is no
/// parent array to make it an index.
pub fn vivify_for(next: &Segment) -> Result<Value, PathError> {
    match next {
        Segment::Index(_) => Ok(Value::array()),
        Segment::Dynamic(expr) => Err(PathError::UnresolvableIndex(expr.clone())),
        Segment::Field(_) | Segment::Quoted(_) | Segment::Key(_) => Ok(Value::object()),
    }
}

pub(crate) fn type_mismatch(segment: &Segment, step: &Step<'_>, found: &Value) -> PathError {
    PathError::TypeMismatch {
        segment: segment.to_string(),
        expected: step.container(),
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARRAY: Option<ContainerKind> = Some(ContainerKind::Array);
    const OBJECT: Option<ContainerKind> = Some(ContainerKind::Object);

    #[test]
    fn test_bracket_integer_is_always_index() {
        let seg = Segment::Index("2".to_string());
        assert_eq!(classify(&seg, ARRAY).unwrap(), Step::Index(2));
        assert_eq!(classify(&seg, OBJECT).unwrap(), Step::Index(2));
        assert_eq!(classify(&seg, None).unwrap(), Step::Index(2));
    }

    #[test]
    fn test_dot_numeric_depends_on_parent() {
        let seg = Segment::Field("1".to_string());
        assert_eq!(classify(&seg, ARRAY).unwrap(), Step::Index(1));
        assert_eq!(classify(&seg, OBJECT).unwrap(), Step::Key("1"));
        assert_eq!(classify(&seg, None).unwrap(), Step::Key("1"));
    }

    #[test]
    fn test_quoted_numeric_is_key() {
        let seg = Segment::Quoted("3".to_string());
        assert_eq!(classify(&seg, ARRAY).unwrap(), Step::Key("3"));
    }

    #[test]
    fn test_invalid_indexes() {
        for raw in ["-1", "1.5"] {
            let seg = Segment::Index(raw.to_string());
            assert_eq!(
                classify(&seg, ARRAY),
                Err(PathError::InvalidIndex(raw.to_string()))
            );
        }
    }

    #[test]
    fn test_index_upper_bound() {
        let max = MAX_ARRAY_INDEX.to_string();
        assert_eq!(
            classify(&Segment::Index(max), ARRAY).unwrap(),
            Step::Index(MAX_ARRAY_INDEX)
        );
        for raw in ["4294967295", "1000000000000000000", "99999999999999999999999"] {
            assert_eq!(
                classify(&Segment::Index(raw.to_string()), ARRAY),
                Err(PathError::InvalidIndex(raw.to_string()))
            );
        }
        // A dot segment that is too large for an index is rejected on arrays.
        assert!(classify(&Segment::Field("4294967295".to_string()), ARRAY).is_err());
    }

    #[test]
    fn test_dynamic_is_unresolvable() {
        let seg = Segment::Dynamic("X.y".to_string());
        assert_eq!(
            classify(&seg, OBJECT),
            Err(PathError::UnresolvableIndex("X.y".to_string()))
        );
    }

    #[test]
    fn test_vivify_for() {
        assert_eq!(vivify_for(&Segment::Index("0".to_string())).unwrap(), Value::array());
        assert_eq!(vivify_for(&Segment::Field("0".to_string())).unwrap(), Value::object());
        assert_eq!(vivify_for(&Segment::Quoted("0".to_string())).unwrap(), Value::object());
        assert!(vivify_for(&Segment::Dynamic("a.b".to_string())).is_err());
    }
}
