pub const TABLE_VERIFIED_PRODUCERS: &str = "verified_producers";

pub const FIELD_AADHAR: &str = "aadhar";
pub const FIELD_NAME: &str = "name";
pub const FIELD_FSSAI_LICENSE_NUMBER: &str = "fssai_license_number";
pub const FIELD_PIN: &str = "pin";
