//! Contract for enumerating live attach candidates.

use crate::core::target::Target;

/// Supplies the processes a user could attach to right now. Implemented by
/// the host (OS process enumeration, remote debug server queries); this
/// crate only consumes the result to offer reattach candidates next to the
/// persisted history.
pub trait TargetSource {
    fn running_targets(&self) -> Vec<Target>;
}
