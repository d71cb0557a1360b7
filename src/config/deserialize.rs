// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates service names and rejects empty service lists.

use nonempty::NonEmpty;
use serde::Deserialize;

use crate::types::ServiceName;

pub fn deserialize_services_option<'de, D>(
    deserializer: D,
) -> Result<Option<NonEmpty<ServiceName>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<Vec<String>> = Option::deserialize(deserializer)?;
    match opt {
        None => Ok(None),
        Some(values) => {
            let services = values
                .iter()
                .map(|s| ServiceName::new(s.trim()))
                .collect::<Result<Vec<_>, _>>()
                .map_err(serde::de::Error::custom)?;

            let nonempty = NonEmpty::from_vec(services)
                .ok_or_else(|| serde::de::Error::custom("services list cannot be empty"))?;
            Ok(Some(nonempty))
        }
    }
}
