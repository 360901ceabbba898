use clap::Parser;
use small_storefront::app::shell;
use small_storefront::utils::error::{ErrorSeverity, StoreError};
use small_storefront::utils::logger;
use small_storefront::{CliConfig, HttpCatalog, Storefront};

fn exit_code(e: &StoreError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
    }
}

fn fail(e: StoreError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(&e));
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 設定錯誤在日誌初始化之前發生，只能直接輸出
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if settings.json_logs {
        logger::init_json_logger(settings.verbose);
    } else {
        logger::init_cli_logger(settings.verbose);
    }

    tracing::info!("Starting storefront against {}", settings.base_url);
    tracing::debug!("Resolved settings: {:?}", settings);

    let catalog = match HttpCatalog::new(&settings) {
        Ok(catalog) => catalog,
        Err(e) => fail(e),
    };
    let mut store = Storefront::new(catalog);

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();

    if let Err(e) = shell::run(&mut store, input, &mut output).await {
        fail(e);
    }

    tracing::info!("👋 Session ended with {} item(s) in cart", store.cart().len());
}
