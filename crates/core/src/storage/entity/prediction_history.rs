use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "prediction_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub prediction_id: Uuid,
    pub patient_id: i32,
    pub patient_name: String,
    pub prediction_result: String, // Term / Preterm
    pub prediction_date: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
