// src/pages/view_state.rs

use crate::common::error::AppError;

// Ciclo de cada tela: o shell mostra "Cargando..." (loading) e o fragmento
// resolve para Ready (dados) ou Failed (mensagem fixa + tabela vazia).
#[derive(Debug)]
pub enum ViewState<T> {
    Ready(T),
    Failed(&'static str),
}

impl<T> ViewState<T> {
    /// A falha é registrada no log e nunca derruba a página.
    pub fn resolve(result: Result<T, AppError>, user_message: &'static str) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                tracing::error!(error = %e, "Falha ao carregar dados da página");
                ViewState::Failed(user_message)
            }
        }
    }

    /// Dados (ou o vazio, em caso de falha) e a mensagem de erro, se houver.
    pub fn into_parts(self) -> (Option<T>, Option<&'static str>) {
        match self {
            ViewState::Ready(data) => (Some(data), None),
            ViewState::Failed(message) => (None, Some(message)),
        }
    }
}
