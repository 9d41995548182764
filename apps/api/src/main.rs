//! # TaskShop API サーバー
//!
//! ユーザー・タスク・カテゴリを HTTP で公開する CRUD バックエンドの
//! エントリーポイント。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `APP_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `APP_PORT` | No | ポート番号（デフォルト: `8000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p taskshop-api
//!
//! # 本番環境
//! APP_PORT=8000 DATABASE_URL=postgres://... cargo run -p taskshop-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use taskshop_api::{
   app_builder::build_app,
   config::AppConfig,
   handler::{TaskState, UserState},
   usecase::{TaskUseCaseImpl, UserUseCaseImpl},
};
use taskshop_domain::clock::{Clock, SystemClock};
use taskshop_infra::{
   PgTransactionManager, TransactionManager, db,
   repository::{
      PostgresTaskRepository, PostgresUserRepository, TaskRepository, UserRepository,
   },
};
use taskshop_shared::observability::LogFormat;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化（LOG_FORMAT で JSON / Pretty を切り替え）
   let registry = tracing_subscriber::registry().with(
      tracing_subscriber::EnvFilter::try_from_default_env()
         .unwrap_or_else(|_| "info,taskshop=debug".into()),
   );
   match LogFormat::from_env() {
      LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
      LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
   }

   // 設定読み込み
   let config = AppConfig::from_env().expect("設定の読み込みに失敗しました");

   tracing::info!(
      "API サーバーを起動します: {}:{}",
      config.server.host,
      config.server.port
   );

   // データベース接続プールを作成し、マイグレーションを適用
   let pool = db::create_pool(&config.database.url)
      .await
      .expect("データベース接続に失敗しました");
   tracing::info!("データベースに接続しました");

   db::run_migrations(&pool)
      .await
      .expect("マイグレーションの適用に失敗しました");

   // 依存コンポーネントを初期化
   let user_repository: Arc<dyn UserRepository> =
      Arc::new(PostgresUserRepository::new(pool.clone()));
   let task_repository: Arc<dyn TaskRepository> =
      Arc::new(PostgresTaskRepository::new(pool.clone()));
   let tx_manager: Arc<dyn TransactionManager> = Arc::new(PgTransactionManager::new(pool));
   let clock: Arc<dyn Clock> = Arc::new(SystemClock);

   let user_state = Arc::new(UserState {
      usecase: UserUseCaseImpl::new(
         user_repository.clone(),
         task_repository.clone(),
         tx_manager.clone(),
         clock.clone(),
      ),
   });
   let task_state = Arc::new(TaskState {
      usecase: TaskUseCaseImpl::new(task_repository, user_repository, tx_manager, clock),
   });

   // ルーター構築
   let app = build_app(user_state, task_state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
      .parse()
      .expect("アドレスのパースに失敗しました");

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
