//! 界面文案
//!
//! 只收录界面真正用到的几条文案；未知语言在 `Locale::from_tag` 中已回退到西班牙语。

use tenpo_movies_shared::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AppTitle,
    AppSubtitle,
    Logout,
    WelcomeBack,
    SignInSubtitle,
    EmailLabel,
    EmailPlaceholder,
    PasswordLabel,
    PasswordPlaceholder,
    SignIn,
    SigningIn,
    LoginFailed,
    GenericError,
    MoviesLoading,
    MoviesLoadingMore,
    MoviesErrorLoading,
    Retry,
    MoviesEnd,
    MoviesEmpty,
    RatingCount,
}

pub fn t(locale: Locale, message: Message) -> &'static str {
    match locale {
        Locale::En => en(message),
        Locale::Es => es(message),
    }
}

fn en(message: Message) -> &'static str {
    match message {
        Message::AppTitle => "Movie Database",
        Message::AppSubtitle => "Browse popular movies",
        Message::Logout => "Logout",
        Message::WelcomeBack => "Welcome Back",
        Message::SignInSubtitle => "Sign in to continue to Movie Database",
        Message::EmailLabel => "Email Address",
        Message::EmailPlaceholder => "Enter your email",
        Message::PasswordLabel => "Password",
        Message::PasswordPlaceholder => "Enter your password",
        Message::SignIn => "Sign In",
        Message::SigningIn => "Signing in...",
        Message::LoginFailed => "Login failed. Please try again.",
        Message::GenericError => "Something went wrong. Please try again later.",
        Message::MoviesLoading => "Loading movies...",
        Message::MoviesLoadingMore => "Loading more movies...",
        Message::MoviesErrorLoading => "Error loading movies",
        Message::Retry => "Try again",
        Message::MoviesEnd => "You've reached the end of the list",
        Message::MoviesEmpty => "No movies found",
        Message::RatingCount => "votes",
    }
}

fn es(message: Message) -> &'static str {
    match message {
        Message::AppTitle => "Base de Datos de Películas",
        Message::AppSubtitle => "Explora las películas populares",
        Message::Logout => "Cerrar sesión",
        Message::WelcomeBack => "Bienvenido de nuevo",
        Message::SignInSubtitle => "Inicia sesión para continuar",
        Message::EmailLabel => "Correo electrónico",
        Message::EmailPlaceholder => "Ingresa tu correo",
        Message::PasswordLabel => "Contraseña",
        Message::PasswordPlaceholder => "Ingresa tu contraseña",
        Message::SignIn => "Iniciar sesión",
        Message::SigningIn => "Iniciando sesión...",
        Message::LoginFailed => "Error al iniciar sesión. Inténtalo de nuevo.",
        Message::GenericError => "Algo salió mal. Inténtalo más tarde.",
        Message::MoviesLoading => "Cargando películas...",
        Message::MoviesLoadingMore => "Cargando más películas...",
        Message::MoviesErrorLoading => "Error al cargar las películas",
        Message::Retry => "Reintentar",
        Message::MoviesEnd => "Has llegado al final de la lista",
        Message::MoviesEmpty => "No se encontraron películas",
        Message::RatingCount => "votos",
    }
}
