pub static TEST_RECIPIENT_EMAIL: &str = "safety@example.com";
pub static TEST_RECIPIENT_PHONE: &str = "+15550100200";
pub static TEST_EMAIL_FROM: &str = "Heimdall Test <alerts@example.com>";
pub static TEST_EMAIL_API_KEY: &str = "re_test_key";
pub static TEST_SMS_ACCOUNT_SID: &str = "AC_test_sid";
pub static TEST_SMS_AUTH_TOKEN: &str = "test_auth_token";
pub static TEST_SMS_FROM_NUMBER: &str = "+15550100999";
pub static TEST_SMS_VERIFY_SID: &str = "VA_test_sid";
