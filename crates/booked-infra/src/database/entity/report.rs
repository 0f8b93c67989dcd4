//! Report entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    #[sea_orm(nullable)]
    pub reported_user_id: Option<Uuid>,
    pub reporting_user_id: Uuid,
    pub reason: String,
    #[sea_orm(column_type = "Text")]
    pub detail: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReportingUserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ReportingUser,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for booked_core::domain::Report {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            reported_user_id: model.reported_user_id,
            reporting_user_id: model.reporting_user_id,
            reason: model.reason,
            detail: model.detail,
            created_at: model.created_at.into(),
        }
    }
}

impl From<booked_core::domain::Report> for ActiveModel {
    fn from(report: booked_core::domain::Report) -> Self {
        Self {
            id: Set(report.id),
            post_id: Set(report.post_id),
            reported_user_id: Set(report.reported_user_id),
            reporting_user_id: Set(report.reporting_user_id),
            reason: Set(report.reason),
            detail: Set(report.detail),
            created_at: Set(report.created_at.into()),
        }
    }
}
