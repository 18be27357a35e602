//! Payload resolution seam.
//!
//! The structured comparator never opens containers itself; it asks a
//! `PayloadResolver` for the rows behind a [`DataItemReference`]. The store
//! crate provides the container-backed implementation.

use crate::errors::{FidelityError, Result};
use crate::model::{DataItemReference, PayloadRows};

/// Turns a DataItem reference into numeric rows
pub trait PayloadResolver {
    /// Fetch the rows addressed by `item`
    ///
    /// # Errors
    ///
    /// - `UnsupportedStorageFormat` for non-external references
    /// - `ContainerIo` when the container or dataset cannot be read
    fn resolve(&self, item: &DataItemReference) -> Result<PayloadRows>;
}

impl<R: PayloadResolver + ?Sized> PayloadResolver for &R {
    fn resolve(&self, item: &DataItemReference) -> Result<PayloadRows> {
        (**self).resolve(item)
    }
}

/// Resolve a block's sole DataItem
///
/// # Errors
///
/// `MissingDataItem` if the block has none; otherwise whatever the resolver returns.
pub fn resolve_block(
    resolver: &dyn PayloadResolver,
    block: &str,
    item: Option<&DataItemReference>,
) -> Result<PayloadRows> {
    let item = item.ok_or_else(|| FidelityError::MissingDataItem {
        block: block.to_string(),
    })?;
    resolver.resolve(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl PayloadResolver for Fixed {
        fn resolve(&self, item: &DataItemReference) -> Result<PayloadRows> {
            match item {
                DataItemReference::External { .. } => Ok(vec![vec![1.0, 2.0]]),
                DataItemReference::Unsupported { format } => {
                    Err(FidelityError::UnsupportedStorageFormat {
                        format: format.clone(),
                    })
                }
            }
        }
    }

    #[test]
    fn test_missing_data_item() {
        let err = resolve_block(&Fixed, "Topology", None).unwrap_err();
        assert_eq!(
            err,
            FidelityError::MissingDataItem {
                block: "Topology".to_string()
            }
        );
    }

    #[test]
    fn test_delegates_to_resolver() {
        let item = DataItemReference::from_parts(Some("HDF"), "a.h5:/x");
        assert_eq!(
            resolve_block(&Fixed, "Geometry", Some(&item)).unwrap(),
            vec![vec![1.0, 2.0]]
        );
    }
}
