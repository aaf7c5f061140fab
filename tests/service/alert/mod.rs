mod run_expiry_sweep;
