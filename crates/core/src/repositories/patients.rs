use super::PatientRepository;
use crate::constants::UNKNOWN_PATIENT_NAME;
use crate::patient::PatientRecord;
use crate::storage::entity::patient_data::{self, Entity as PatientData};
use crate::{PtbError, PtbResult};
use async_trait::async_trait;
use ptb_types::PatientId;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone, Debug)]
pub struct SeaOrmPatientRepository {
    db: DatabaseConnection,
}

impl SeaOrmPatientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PatientRepository for SeaOrmPatientRepository {
    async fn find_by_id(&self, id: PatientId) -> PtbResult<Option<PatientRecord>> {
        let row = PatientData::find()
            .filter(patient_data::Column::PatientId.eq(id.value()))
            .one(&self.db)
            .await
            .map_err(|e| PtbError::Persistence(format!("patient lookup failed: {}", e)))?;

        Ok(row.map(PatientRecord::from))
    }
}

impl From<patient_data::Model> for PatientRecord {
    fn from(m: patient_data::Model) -> Self {
        Self {
            patient_id: PatientId::new(m.patient_id),
            patient_name: m
                .patient_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_PATIENT_NAME.to_string()),
            gestation: m.gestation,
            age: m.age,
            parity: m.parity,
            abortions: m.abortions,
            weight: m.weight,
            hypertension: m.hypertension,
            diabetes: m.diabetes,
            placental_position: m.placental_position,
            bleeding_first_trimester: m.bleeding_first_trimester,
            bleeding_second_trimester: m.bleeding_second_trimester,
            funneling: m.funneling,
            smoker: m.smoker,
            root_mean_square: m.root_mean_square,
            median_frequency: m.median_frequency,
            peak_frequency: m.peak_frequency,
            sample_entropy: m.sample_entropy,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::patient::PatientRecord;
    use crate::storage::entity::patient_data;
    use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

    /// Writes a patient row the way the offline loader would.
    pub async fn insert_patient(db: &DatabaseConnection, p: &PatientRecord, name: Option<&str>) {
        patient_data::ActiveModel {
            patient_id: Set(p.patient_id.value()),
            patient_name: Set(name.map(str::to_string)),
            gestation: Set(p.gestation),
            age: Set(p.age),
            parity: Set(p.parity),
            abortions: Set(p.abortions),
            weight: Set(p.weight),
            hypertension: Set(p.hypertension),
            diabetes: Set(p.diabetes),
            placental_position: Set(p.placental_position),
            bleeding_first_trimester: Set(p.bleeding_first_trimester),
            bleeding_second_trimester: Set(p.bleeding_second_trimester),
            funneling: Set(p.funneling),
            smoker: Set(p.smoker),
            root_mean_square: Set(p.root_mean_square),
            median_frequency: Set(p.median_frequency),
            peak_frequency: Set(p.peak_frequency),
            sample_entropy: Set(p.sample_entropy),
        }
        .insert(db)
        .await
        .expect("insert patient row");
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::insert_patient;
    use super::*;
    use crate::patient::test_support::patient;
    use crate::storage::establish_connection;

    #[tokio::test]
    async fn finds_existing_patient() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        let stored = patient(101, "Ada Obi", 40.0);
        insert_patient(&db, &stored, Some("Ada Obi")).await;

        let repo = SeaOrmPatientRepository::new(db);
        let found = repo.find_by_id(PatientId::new(101)).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn missing_patient_is_none() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        let repo = SeaOrmPatientRepository::new(db);
        assert_eq!(repo.find_by_id(PatientId::new(999)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn nameless_patient_reads_as_unknown() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        insert_patient(&db, &patient(7, "ignored", 36.0), None).await;

        let repo = SeaOrmPatientRepository::new(db);
        let found = repo.find_by_id(PatientId::new(7)).await.unwrap().unwrap();
        assert_eq!(found.patient_name, "Unknown");
    }
}
