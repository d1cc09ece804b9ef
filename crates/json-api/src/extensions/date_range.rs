//! Stay-date query parsing helpers.

use jiff::civil::Date;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait DateParamExt {
    fn into_date(self, name: &str) -> Result<Date, StatusError>;
}

impl DateParamExt for QueryParam<String, true> {
    fn into_date(self, name: &str) -> Result<Date, StatusError> {
        self.into_inner()
            .parse::<Date>()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}
