mod file_plan_id_store;
mod in_memory_plan_id_store;

pub use file_plan_id_store::{FilePlanIdStore, PLAN_ID_CACHE_NAME};
pub use in_memory_plan_id_store::InMemoryPlanIdStore;
