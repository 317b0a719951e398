//! Generic serialize/deserialize over an [`AttributeBag`].
//!
//! Each entry maps to one child node named after its key. A failing entry
//! never stops the walk; it is reported to the [`ErrorPolicy`] and the
//! aggregate result turns false. Only an error returned by the policy
//! itself propagates.

use kdl::KdlNode;

use crate::accessor::NodeAccessor;
use crate::bag::AttributeBag;
use crate::config::TreeConfig;
use crate::error::AttrError;
use crate::policy::ErrorPolicy;
use crate::value::AttrValue;

/// Write every entry of `bag` as a child of `root`.
///
/// Composite entries fail with `Unsupported` and leave no node behind.
/// Returns `Ok(true)` iff every entry was written.
pub fn serialize_attributes<'a, P: ErrorPolicy + ?Sized>(
    bag: &AttributeBag,
    root: impl Into<Option<&'a mut KdlNode>>,
    config: &TreeConfig,
    policy: &P,
) -> Result<bool, AttrError> {
    let mut root = root.into();
    let mut complete = true;

    for (key, value) in bag.iter() {
        let written = if value.kind().is_composite() {
            Err(AttrError::unsupported(key, value.kind()))
        } else {
            NodeAccessor::find_or_create(root.as_deref_mut(), key).write_value(value, config)
        };

        if let Err(err) = written {
            complete = false;
            policy.on_serialize_error(key, &err)?;
        }
    }

    Ok(complete)
}

/// Values parsed from a tree, not yet applied to their bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadOutcome {
    updates: Vec<(String, AttrValue)>,
    complete: bool,
}

impl ReadOutcome {
    pub fn updates(&self) -> &[(String, AttrValue)] {
        &self.updates
    }

    /// Whether every entry was read.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Overwrite the matching entries of `bag`, returning [`Self::is_complete`].
    pub fn apply(self, bag: &mut AttributeBag) -> bool {
        for (key, value) in self.updates {
            bag.replace_value(&key, value);
        }
        self.complete
    }
}

/// Read a value for every entry of `bag` from the children of `root`.
///
/// Entries are read with the kind they currently hold. Failures go to
/// `policy.on_deserialize_error`; the entry is left out of the outcome.
pub fn read_attributes<'a, P: ErrorPolicy + ?Sized>(
    bag: &AttributeBag,
    root: impl Into<Option<&'a KdlNode>>,
    config: &TreeConfig,
    policy: &P,
) -> Result<ReadOutcome, AttrError> {
    let root = root.into();
    let mut outcome = ReadOutcome {
        updates: Vec::with_capacity(bag.len()),
        complete: true,
    };

    for (key, value) in bag.iter() {
        match NodeAccessor::find(root, key).read_value(value.kind(), config) {
            Ok(parsed) => outcome.updates.push((key.to_string(), parsed)),
            Err(err) => {
                outcome.complete = false;
                policy.on_deserialize_error(key, &err)?;
            }
        }
    }

    Ok(outcome)
}

/// Populate `bag` from the children of `root`.
///
/// Entries that cannot be read keep their previous value. If the policy
/// escalates a failure, the error is returned and `bag` is left untouched.
pub fn deserialize_attributes<'a, P: ErrorPolicy + ?Sized>(
    bag: &mut AttributeBag,
    root: impl Into<Option<&'a KdlNode>>,
    config: &TreeConfig,
    policy: &P,
) -> Result<bool, AttrError> {
    let outcome = read_attributes(bag, root, config, policy)?;
    Ok(outcome.apply(bag))
}
