//! The error aggregator.

use crate::classify::{Contribution, classify};
use errors_plus_core::{Descriptor, ErrorDto, ErrorFlags, Flag, IntoDescriptor, RawDescriptor};
use errors_plus_openapi::{ResponseMerger, Responses, Result};
use serde_json::Value;

/// Builder for the documented errors of one endpoint.
///
/// Positional descriptors (raw fragments, error DTOs, JSON) are added in order; the
/// standard errors are switched on with flags. `build` merges everything into one
/// [`Responses`] map.
///
/// ```
/// use errors_plus::{BaseErrorDto, Errors};
/// use serde_json::json;
///
/// let responses = Errors::new()
///     .json(json!({"404": {
///         "description": "Not found",
///         "content": {"application/json": {"example": {"detail": "Item not found"}}}
///     }}))
///     .error(BaseErrorDto::new(409, "Item already exists"))
///     .unauthorized_401(true)
///     .build()?;
///
/// assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![401, 422, 404, 409]);
/// # Ok::<(), errors_plus::AggregateError>(())
/// ```
#[derive(Debug, Default)]
pub struct Errors {
    descriptors: Vec<Descriptor>,
    flags: ErrorFlags,
}

impl Errors {
    /// Create an empty builder. Only the validation error is documented by default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate descriptors and flags in one call.
    pub fn aggregate<I>(descriptors: I, flags: ErrorFlags) -> Result<Responses>
    where
        I: IntoIterator,
        I::Item: IntoDescriptor,
    {
        let contributions = descriptors
            .into_iter()
            .enumerate()
            .map(|(position, descriptor)| classify(position, descriptor.into_descriptor()))
            .collect::<Result<Vec<_>>>()?;

        let mut merger = ResponseMerger::new();
        for standard in flags.resolve() {
            merger.merge_synthetic(
                standard.status_code(),
                standard.description(),
                standard.example_key(),
                standard.example(),
            );
        }

        let count = contributions.len();
        for contribution in contributions {
            match contribution {
                Contribution::Raw(fragments) => {
                    for (status_code, fragment) in &fragments {
                        merger.merge_raw_fragment(*status_code, fragment)?;
                    }
                }
                Contribution::Protocol {
                    status_code,
                    message,
                    examples,
                } => merger.merge_protocol(status_code, message, examples),
            }
        }

        let responses = merger.finish();
        tracing::debug!(descriptors = count, statuses = responses.len(), "aggregated error responses");
        Ok(responses)
    }

    /// Add any descriptor.
    pub fn descriptor(mut self, descriptor: impl IntoDescriptor) -> Self {
        self.descriptors.push(descriptor.into_descriptor());
        self
    }

    /// Add an error DTO.
    pub fn error(self, dto: impl ErrorDto + 'static) -> Self {
        self.descriptor(Descriptor::error(dto))
    }

    /// Add raw response fragments.
    pub fn raw(self, raw: RawDescriptor) -> Self {
        self.descriptor(raw)
    }

    /// Add a JSON descriptor (status code mapping or serialized error DTO).
    pub fn json(self, value: Value) -> Self {
        self.descriptor(value)
    }

    /// Replace all flags.
    pub fn flags(mut self, flags: ErrorFlags) -> Self {
        self.flags = flags;
        self
    }

    /// See [`ErrorFlags::unauthorized`] (401, legacy).
    pub fn unauthorized(mut self, on: bool) -> Self {
        self.flags = self.flags.unauthorized(on);
        self
    }

    /// See [`ErrorFlags::unauthorized_401`] (401, explicit).
    pub fn unauthorized_401(mut self, on: bool) -> Self {
        self.flags = self.flags.unauthorized_401(on);
        self
    }

    /// See [`ErrorFlags::forbidden`] (403, legacy).
    pub fn forbidden(mut self, on: bool) -> Self {
        self.flags = self.flags.forbidden(on);
        self
    }

    /// See [`ErrorFlags::forbidden_403`] (403, explicit).
    pub fn forbidden_403(mut self, on: bool) -> Self {
        self.flags = self.flags.forbidden_403(on);
        self
    }

    /// See [`ErrorFlags::validation_error`] (422, legacy).
    pub fn validation_error(mut self, flag: impl Into<Flag>) -> Self {
        self.flags = self.flags.validation_error(flag);
        self
    }

    /// See [`ErrorFlags::validation_error_422`] (422, explicit).
    pub fn validation_error_422(mut self, flag: impl Into<Flag>) -> Self {
        self.flags = self.flags.validation_error_422(flag);
        self
    }

    /// See [`ErrorFlags::internal_server_error`] (500, legacy).
    pub fn internal_server_error(mut self, on: bool) -> Self {
        self.flags = self.flags.internal_server_error(on);
        self
    }

    /// See [`ErrorFlags::internal_server_error_500`] (500, explicit).
    pub fn internal_server_error_500(mut self, on: bool) -> Self {
        self.flags = self.flags.internal_server_error_500(on);
        self
    }

    /// Merge everything added so far.
    pub fn build(self) -> Result<Responses> {
        Self::aggregate(self.descriptors, self.flags)
    }
}

/// Aggregate error descriptors with optional flags.
///
/// Positional descriptors come first, then `;` and `flag = value` pairs:
///
/// ```
/// use errors_plus::{BaseErrorDto, errors};
///
/// let responses = errors![
///     BaseErrorDto::new(404, "Not found");
///     unauthorized_401 = true,
///     validation_error_422 = false,
/// ]?;
/// assert_eq!(responses.status_codes().collect::<Vec<_>>(), vec![401, 404]);
///
/// let defaults = errors![]?;
/// assert!(defaults.contains(422));
/// # Ok::<(), errors_plus::AggregateError>(())
/// ```
#[macro_export]
macro_rules! errors {
    ($($descriptor:expr),* $(,)? $(; $($flag:ident = $value:expr),* $(,)?)?) => {
        $crate::Errors::new()
            $(.descriptor($descriptor))*
            $($(.$flag($value))*)?
            .build()
    };
}
