pub mod aggregate;
pub mod draft;
pub mod form;
pub mod gateway;
pub mod normalize;
pub mod payload;
pub mod validation;

pub use aggregate::{
    LegacyReceptionCreate, ReceptionId, ReceptionListQuery, ReceptionUpdate, Vehicle,
    VehicleReception, VehicleReceptionList,
};
pub use draft::{ReceptionDraft, ValidatedDraft, VehicleDraft};
pub use form::{FormError, FormPhase, ReceptionForm};
pub use gateway::{CreatedReception, GatewayError, ReceptionGateway};
pub use normalize::normalize;
pub use payload::{ReceptionCreate, VehicleCreate};
pub use validation::{validate_draft, FieldErrors, FieldKey};
