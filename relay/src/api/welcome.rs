pub const WELCOME_MESSAGE: &str = "Welcome to the prediction API";

pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}
