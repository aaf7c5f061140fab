mod find_missing;
