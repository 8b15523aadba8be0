pub mod patient_data;
pub mod prediction_history;

pub use patient_data::Entity as PatientData;
pub use prediction_history::Entity as PredictionHistory;
