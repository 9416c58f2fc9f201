//! Named checker invocation.

use tagcheck_core::{CheckResult, CheckerList, FieldFailure, FieldMeta, Rejection};

/// Run every checker in `list` in declaration order.
///
/// `invoke` looks a name up in the registry and calls it, returning `None`
/// when no checker of that name is registered for the category.
pub(crate) fn run_named(
    meta: &FieldMeta,
    list: &CheckerList,
    category: &'static str,
    mut invoke: impl FnMut(&str) -> Option<Result<(), Rejection>>,
) -> CheckResult {
    for name in list.names() {
        tracing::trace!(field = meta.name(), checker = name, category, "running named checker");
        match invoke(name) {
            Some(Ok(())) => {}
            Some(Err(rejection)) => {
                return Err(
                    FieldFailure::new(Some(meta), format!("checker {name}: {rejection}")).into(),
                );
            }
            None => {
                return Err(FieldFailure::new(Some(meta), format!("checker {name} not found")).into());
            }
        }
    }
    Ok(())
}
