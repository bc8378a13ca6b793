pub mod task_service_test;
