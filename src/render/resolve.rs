use crate::types::path::{Path, PathKind};
use crate::Value;

/// Resolves a path against the current and the top-level context.
///
/// Returns `None` if any segment is missing, a list index is not a number or
/// out of bounds, or a segment indexes into a scalar. Missing data is never
/// an error.
///
/// # Examples
///
/// ```
/// use arbor::{resolve, value, Path};
///
/// let ctx = value! { a: { b: { c: 5 } } };
/// let path = Path::new("a.b.c")?;
/// assert_eq!(resolve(&path, &ctx, &ctx), Some(&arbor::Value::Integer(5)));
///
/// let path = Path::new("a.x")?;
/// assert_eq!(resolve(&path, &ctx, &ctx), None);
/// # Ok::<(), arbor::Error>(())
/// ```
pub fn resolve<'a>(path: &Path, current: &'a Value, parent: &'a Value) -> Option<&'a Value> {
    match path.kind() {
        PathKind::This => Some(current),
        PathKind::Current(segments) => lookup_path(current, segments),
        PathKind::Parent(segments) => lookup_path(parent, segments),
    }
}

fn lookup_path<'a>(value: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments.iter().try_fold(value, |v, s| lookup(v, s))
}

/// Index into the value with a single path segment.
fn lookup<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Map(map) => map.get(segment),
        Value::List(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
        _ => None,
    }
}
