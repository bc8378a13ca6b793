pub mod task_repository_test;
