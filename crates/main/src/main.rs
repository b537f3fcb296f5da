//! 主应用程序入口
//!
//! 组装依赖并运行终端交互循环：登录/注册 → 房间大厅 → 聊天。

use std::sync::Arc;

use application::{
    ApplicationError, AuthGateway, RoomSessionController, SessionError, SessionService,
    SessionServiceDependencies, SessionStore, SignupError, SignupForm,
};
use config::AppConfig;
use domain::{room_catalog, SignupField};
use infrastructure::{FileSessionStore, HttpAuthGateway};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

/// 未取得用户资料时的发送者昵称
const FALLBACK_NICKNAME: &str = "Nickname";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 读取环境变量配置
    let config = AppConfig::from_env();
    tracing::info!(base_url = %config.api.base_url, "LarkTalk 客户端启动");

    // 组装协作方与会话服务
    let gateway: Arc<dyn AuthGateway> = Arc::new(HttpAuthGateway::new(&config.api)?);
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&config.session.storage_path));
    let sessions = SessionService::new(SessionServiceDependencies {
        gateway: Arc::clone(&gateway),
        store,
        trust_persisted_token: config.session.trust_persisted_token,
    });

    let mut editor = DefaultEditor::new()?;

    // 启动时尝试恢复上次的会话
    let restored = sessions.rehydrate().await;
    if restored.is_authenticated() {
        println!(
            "Welcome back, {}!",
            restored.login_id.as_deref().unwrap_or_default()
        );
    }

    println!("Lark Talk");
    println!("Where memories are created");
    loop {
        let proceed = if sessions.current().await.is_authenticated() {
            run_lobby(&mut editor, &sessions).await?
        } else {
            run_auth(&mut editor, &sessions, &gateway).await?
        };
        if !proceed {
            break;
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// 读取一行输入；Ctrl+C / Ctrl+D 返回 `None`
fn prompt(editor: &mut DefaultEditor, text: &str) -> anyhow::Result<Option<String>> {
    match editor.readline(text) {
        Ok(line) => {
            let _ = editor.add_history_entry(line.as_str());
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// 未认证时的入口菜单；返回 `false` 表示退出程序
async fn run_auth(
    editor: &mut DefaultEditor,
    sessions: &SessionService,
    gateway: &Arc<dyn AuthGateway>,
) -> anyhow::Result<bool> {
    println!("\nCommands: login, signup, quit");
    loop {
        let Some(line) = prompt(editor, "> ")? else {
            return Ok(false);
        };
        match line.trim() {
            "login" => {
                if attempt_login(editor, sessions).await? {
                    return Ok(true);
                }
            }
            "signup" => run_signup(editor, Arc::clone(gateway)).await?,
            "quit" | "exit" => return Ok(false),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

/// 交互式登录；认证成功时返回 `true`
async fn attempt_login(
    editor: &mut DefaultEditor,
    sessions: &SessionService,
) -> anyhow::Result<bool> {
    let Some(login) = prompt(editor, "Login: ")? else {
        return Ok(false);
    };
    let Some(password) = prompt(editor, "Password: ")? else {
        return Ok(false);
    };

    match sessions.submit_login(login.trim(), password.trim()).await {
        Ok(session) if session.is_authenticated() => {
            println!("Signed in as {}.", login.trim());
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(err) => {
            println!("{}", user_message(&err));
            Ok(false)
        }
    }
}

/// 交互式注册：逐字段填写，校验失败时只重新录入有问题的字段
async fn run_signup(
    editor: &mut DefaultEditor,
    gateway: Arc<dyn AuthGateway>,
) -> anyhow::Result<()> {
    println!("\nCreate profile");
    println!("First step towards magic!");
    let mut form = SignupForm::new(gateway);

    for field in SignupField::ALL {
        let Some(value) = prompt(editor, &format!("{field}: "))? else {
            return Ok(());
        };
        form.edit(field, value.trim());
    }

    loop {
        match form.submit().await {
            Ok(()) => {
                println!("Account successfully created! You can sign in now.");
                return Ok(());
            }
            Err(SignupError::Invalid) => {
                let fields: Vec<SignupField> =
                    form.violations().iter().map(|(field, _)| field).collect();
                for field in &fields {
                    if let Some(message) = form.violations().get(*field) {
                        println!("{field}: {message}");
                    }
                }
                for field in fields {
                    let Some(value) = prompt(editor, &format!("{field}: "))? else {
                        return Ok(());
                    };
                    form.edit(field, value.trim());
                }
            }
            Err(err) => {
                println!("Error: {err}");
                return Ok(());
            }
        }
    }
}

/// 已认证后的大厅与聊天循环；返回 `false` 表示退出程序
async fn run_lobby(
    editor: &mut DefaultEditor,
    sessions: &SessionService,
) -> anyhow::Result<bool> {
    // 资料拉取失败不阻塞大厅，昵称退回占位值
    let profile = sessions.fetch_profile().await;
    let nickname = profile
        .as_ref()
        .map(|profile| profile.nickname.clone())
        .unwrap_or_else(|| FALLBACK_NICKNAME.to_string());

    println!("\nWelcome, {nickname}! Select room:");
    let catalog = room_catalog();
    for room in &catalog {
        println!("  {}. {}", room.id, room.display_name);
    }
    println!("Commands: open <id>, profile, logout, quit");

    let mut controller = RoomSessionController::new(nickname);
    loop {
        if let Some(room) = controller.active_room() {
            let header = format!("[{}] ", room.display_name);
            let Some(line) = prompt(editor, &header)? else {
                return Ok(false);
            };
            if line.trim() == "/close" {
                controller.close_room();
                continue;
            }
            controller.set_input(line.clone());
            controller.send_message(&line);
            render_appended(&mut controller);
            continue;
        }

        let Some(line) = prompt(editor, "lobby> ")? else {
            return Ok(false);
        };
        let line = line.trim();

        if let Some(id) = line.strip_prefix("open ") {
            match id.trim().parse::<u32>().ok().and_then(|id| {
                catalog.iter().find(|room| room.id == id).cloned()
            }) {
                Some(room) => {
                    controller.open_room(room);
                    render_buffer(&mut controller);
                }
                None => println!("No such room: {id}"),
            }
            continue;
        }

        match line {
            "profile" => show_profile(sessions).await,
            "logout" => {
                sessions.logout().await;
                println!("You have been logged out.");
                return Ok(true);
            }
            "quit" | "exit" => return Ok(false),
            "" => {}
            other => println!("Unknown command: {other}"),
        }
    }
}

/// 打开房间后输出整个缓冲
fn render_buffer(controller: &mut RoomSessionController) {
    for message in controller.messages() {
        println!("{}: {}", message.sender, message.text);
    }
    // 取走滚动目标：最新一条已经在屏幕上
    let _ = controller.take_scroll_target();
}

/// 追加消息后只输出最新一条
fn render_appended(controller: &mut RoomSessionController) {
    if controller.take_scroll_target().is_some() {
        if let Some(message) = controller.messages().last() {
            println!("{}: {}", message.sender, message.text);
        }
    }
}

async fn show_profile(sessions: &SessionService) {
    match sessions.fetch_profile().await {
        Some(profile) => {
            println!("Login:      {}", profile.login);
            println!("Nickname:   {}", profile.nickname);
            println!("Email:      {}", profile.email);
            println!("Roles:      {}", profile.roles);
            println!("Created at: {}", profile.created_at);
        }
        None => println!("Profile is not available right now."),
    }
}

/// 提取面向用户的错误文案
fn user_message(err: &ApplicationError) -> String {
    match err {
        ApplicationError::Session(session_err) => match session_err {
            SessionError::Validation(message) => message.clone(),
            other => other.to_string(),
        },
        other => other.to_string(),
    }
}
