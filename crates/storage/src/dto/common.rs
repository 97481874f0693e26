use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Optional event year selector; handlers fall back to the configured year.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    #[validate(range(min = 2015, max = 2100, message = "year must be between 2015 and 2100"))]
    pub year: Option<i32>,
}

impl YearQuery {
    pub fn year_or(&self, default_year: i32) -> i32 {
        self.year.unwrap_or(default_year)
    }
}
