use super::{HistoryOrder, PredictionHistoryStore};
use crate::prediction::PredictionRecord;
use crate::storage::entity::prediction_history::{self, Entity as PredictionHistory};
use crate::{PtbError, PtbResult};
use async_trait::async_trait;
use ptb_types::{Label, PatientId};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};

#[derive(Clone, Debug)]
pub struct SeaOrmPredictionHistory {
    db: DatabaseConnection,
}

impl SeaOrmPredictionHistory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PredictionHistoryStore for SeaOrmPredictionHistory {
    async fn append(&self, record: &PredictionRecord) -> PtbResult<()> {
        prediction_history::ActiveModel {
            prediction_id: Set(record.prediction_id.uuid()),
            patient_id: Set(record.patient_id.value()),
            patient_name: Set(record.patient_name.clone()),
            prediction_result: Set(record.prediction_result.as_str().to_string()),
            prediction_date: Set(record.prediction_date),
        }
        .insert(&self.db)
        .await
        .map_err(|e| PtbError::Persistence(format!("failed to append prediction: {}", e)))?;

        Ok(())
    }

    async fn list(&self, limit: u64, order: HistoryOrder) -> PtbResult<Vec<PredictionRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut query = PredictionHistory::find();
        if order == HistoryOrder::NewestFirst {
            query = query.order_by_desc(prediction_history::Column::PredictionDate);
        }

        let rows = query
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| PtbError::Persistence(format!("failed to list predictions: {}", e)))?;

        rows.into_iter().map(PredictionRecord::try_from).collect()
    }
}

impl TryFrom<prediction_history::Model> for PredictionRecord {
    type Error = PtbError;

    fn try_from(m: prediction_history::Model) -> Result<Self, Self::Error> {
        let label = m.prediction_result.parse::<Label>().map_err(|e| {
            PtbError::Persistence(format!("prediction {}: {}", m.prediction_id, e))
        })?;

        Ok(Self {
            prediction_id: m.prediction_id.into(),
            patient_id: PatientId::new(m.patient_id),
            patient_name: m.patient_name,
            prediction_result: label,
            prediction_date: m.prediction_date,
        })
    }
}
