//! 数据表抽样检查程序
//!
//! 依次检查 `finished_goods` 与 `product_logistics_specs` 两张表，
//! 对每张表输出记录数量（最多 5 条）、首条记录的字段名与内容。
//! 任一张表失败只会打印错误，不影响另一张表的检查，进程总是正常退出。
//!
//! # 运行方式
//!
//! ```bash
//! cargo run
//! ```
//!
//! 服务地址与 key 可通过 `SUPABASE_URL`、`SUPABASE_KEY` 覆盖；
//! 日志写入标准错误，级别由 `RUST_LOG` 控制。
//!
//! # 输出示例
//!
//! ```text
//! --- Checking finished_goods ---
//! Count (limit 5): 2
//! Sample Keys: [id, sku, name]
//! Sample Data: {"id":1,"sku":"FG-001","name":"Pallet"}
//! --- Checking product_logistics_specs ---
//! Error: 404 {"message":"relation does not exist"}
//! ```

#![warn(missing_docs)]

use anyhow::Result;

#[cfg(feature = "reqwest")]
use table_inspector::{Credentials, DEFAULT_TABLES, fetch::reqwest::Inspector};

/// 初始化日志，输出到标准错误，避免与报告混在一起。
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("table_inspector=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 主函数
///
/// 按顺序检查每张默认表；前一张表的输出完成后才开始下一张。
#[cfg(feature = "reqwest")]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let credentials = Credentials::from_env();
    tracing::debug!(?credentials, "loaded credentials");
    let inspector = Inspector::new(credentials)?;

    for table in DEFAULT_TABLES {
        inspector.check_table(table).await;
    }

    Ok(())
}

#[cfg(not(feature = "reqwest"))]
fn main() -> Result<()> {
    init_tracing();
    tracing::error!("table-inspector requires the `reqwest` feature to be enabled");
    Ok(())
}
