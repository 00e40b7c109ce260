use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "nullable")]
    pub address1: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address2: String,
    #[serde(default, deserialize_with = "nullable")]
    pub city: String,
    #[serde(default, deserialize_with = "nullable")]
    pub state: NamedRef,
    #[serde(default, deserialize_with = "nullable")]
    pub country: NamedRef,
    #[serde(rename = "zipCode", default, deserialize_with = "nullable")]
    pub zip_code: String,
    #[serde(rename = "phoneNumber", default, deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(rename = "addressFullName", default, deserialize_with = "nullable")]
    pub address_full_name: String,
}

impl Address {
    /// Zip code used for coordinate lookup: the 5-digit prefix of a ZIP+4,
    /// or the value as given when shorter.
    pub fn lookup_zip(&self) -> &str {
        match self.zip_code.get(..5) {
            Some(prefix) => prefix,
            None => &self.zip_code,
        }
    }

    pub fn city_state(&self) -> String {
        format!("{}, {}", self.city, self.state.name)
    }
}

/// One examiner entry as returned by the designee registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Designee {
    #[serde(rename = "designeeNumber", default, deserialize_with = "nullable")]
    pub designee_number: String,
    #[serde(rename = "phoneNumber", default, deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Address,
    #[serde(rename = "fullName", default, deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(rename = "functionCodes", default, deserialize_with = "nullable")]
    pub function_codes: String,
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
    #[serde(rename = "completeAddress", default, deserialize_with = "nullable")]
    pub complete_address: String,
}

impl Designee {
    /// Address-level phone number, if present and different from the primary one.
    pub fn secondary_phone(&self) -> Option<&str> {
        let phone = self.address.phone_number.as_str();
        if phone.is_empty() || phone == self.phone_number {
            None
        } else {
            Some(phone)
        }
    }
}
