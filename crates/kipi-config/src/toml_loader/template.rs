/// Generate the default TOML config content with comments.
pub fn default_config_toml() -> String {
    r##"# kipi configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[credentials]
# api_key = ""                 # leave empty to read the variable below
# api_key_env = "GEMINI_API_KEY"

[generation]
# model = "gemini-2.5-flash"   # gemini-2.5-flash, gemini-2.5-pro, gemini-2.0-flash
# temperature = 0.7            # 0.0-2.0
# max_output_tokens = 1000     # 100-2000
# output_mode = "incremental"  # incremental, batch

[render]
# typing_interval_ms = 10      # 0-1000, 0 disables the typing effect
# cursor = "▌"

[network]
# api_base = "https://generativelanguage.googleapis.com/v1beta/models"
# connect_timeout_secs = 10    # 1-120
# request_timeout_secs = 120   # 1-600

[export]
# directory = "."
# file_prefix = "kipi_chat"

[stats]
# show = false

[logging]
# level = "kipi=info"
"##
    .to_string()
}
