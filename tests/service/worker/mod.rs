mod list_workers;
