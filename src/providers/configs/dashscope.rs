use super::base::ProviderConfig;
use crate::errors::SkillError;
use anyhow::Result;

pub const DASHSCOPE_API_HOST: &str = "https://dashscope.aliyuncs.com/api/v1";

pub struct DashScopeProviderConfig {
    pub api_key: String,
    pub host: String,
}

impl DashScopeProviderConfig {
    pub fn new(api_key: String, host: String) -> Self {
        Self { api_key, host }
    }
}

impl ProviderConfig for DashScopeProviderConfig {
    fn from_env() -> Result<Self> {
        let api_key = Self::get_env("DASHSCOPE_API_KEY", false, None)?
            .ok_or(SkillError::MissingApiKey)?;

        let host = Self::get_env(
            "DASHSCOPE_HTTP_BASE_URL",
            false,
            Some(DASHSCOPE_API_HOST.to_string()),
        )?
        .unwrap_or_else(|| DASHSCOPE_API_HOST.to_string());

        Ok(Self::new(api_key, host))
    }
}
