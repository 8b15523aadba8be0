use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "patient_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub patient_id: i32,
    #[sea_orm(column_name = "name")]
    pub patient_name: Option<String>,
    pub gestation: f64,
    pub age: i32,
    pub parity: i32,
    pub abortions: i32,
    pub weight: f64,
    pub hypertension: i32,
    pub diabetes: i32,
    pub placental_position: i32,
    pub bleeding_first_trimester: i32,
    pub bleeding_second_trimester: i32,
    pub funneling: i32,
    pub smoker: i32,
    pub root_mean_square: f64,
    pub median_frequency: f64,
    pub peak_frequency: f64,
    pub sample_entropy: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
