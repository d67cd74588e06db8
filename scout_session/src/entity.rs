//! Sea-orm entity for the per-conversation message log.

pub mod messages {
    use sea_orm::entity::prelude::*;

    /// One persisted message row. Insertion order (the rowid) is the
    /// conversation order.
    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "messages")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        #[sea_orm(indexed)]
        pub conversation_id: String,
        pub role: String,
        pub content: String,
        pub created_at: DateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
