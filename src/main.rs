// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use imgcrawlrs::config::settings::Settings;
use imgcrawlrs::domain::models::search_output::SearchOutput;
use imgcrawlrs::domain::services::search_service::SearchService;
use imgcrawlrs::infrastructure::crawler::DefaultCrawlerFactory;
use imgcrawlrs::presentation::cli::{parse_args, ParsedArgs};
use imgcrawlrs::presentation::output::emit;
use imgcrawlrs::utils::telemetry;

/// 主函数
///
/// 解析参数、执行一次图片搜索，并把结果 JSON 写到标准输出
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let request = match parse_args(std::env::args_os()) {
        ParsedArgs::Search(request) => request,
        ParsedArgs::Usage => exit_with(&SearchOutput::usage()),
    };

    // 2. Load configuration
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => exit_with(&SearchOutput::failure(
            format!("Configuration error: {}", e),
            &request.engine,
            &request.keyword,
        )),
    };

    // 3. Initialize logging
    let log_level = settings.logging.level_filter();
    telemetry::init_telemetry(log_level);
    tracing::debug!("Configuration loaded: {:?}", settings);

    // 4. Run the search
    let service = SearchService::new(
        DefaultCrawlerFactory::new(settings.crawler),
        settings.output,
        log_level,
    );
    let output = service.search(&request).await;

    // 5. Print result
    emit(&output).context("Failed to write result to stdout")?;
    std::process::exit(output.exit_code())
}

/// 在搜索开始前输出结果并退出
fn exit_with(output: &SearchOutput) -> ! {
    if let Err(e) = emit(output) {
        eprintln!("Failed to write result to stdout: {}", e);
    }
    std::process::exit(output.exit_code())
}
