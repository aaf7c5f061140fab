mod add_license;
