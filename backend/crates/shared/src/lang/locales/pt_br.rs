use crate::lang::catalog::{AccountStrings, Catalog, ExceptionStrings, SocialStrings, StackStrings};

fn invalid_custom_field(field: &str) -> String {
    format!("Campo {field} inválido")
}

/// Português (Brasil) - idioma padrão
pub static PT_BR: Catalog = Catalog {
    code: "pt-BR",
    invalid_url: "URL inválida",
    exception: ExceptionStrings {
        bad_request: "Solicitação inválida",
        unauthorized: "Não autorizado",
        forbidden: "Acesso proibido",
        not_found: "Recurso não encontrado ou removido",
        method_not_allowed: "Método não permitido",
        conflict: "Conflito de dados",
        conflict_entity_already_exists: "Já existe um registro com os dados informados",
        unprocessable_entity: "Entidade não processável",
        internal_server_error: "Ocorreu um erro interno",
        not_implemented: "Funcionalidade não implementada",
        service_unavailable: "Serviço indisponível",
        invalid_custom_field,
    },
    account: AccountStrings {
        invalid_name: "Nome informado é muito curto ou não foi considerado válido",
        invalid_username: "Username informado é muito curto ou não foi considerado válido",
        invalid_email: "Endereço de e-mail não foi considerado válido",
        invalid_password: "Senha informada é muito fraca",
        username_exist: "Já existe um usuário com o username informado",
        email_exist: "Já existe um usuário com o e-mail informado",
        not_found: "Usuário não encontrado",
        unauthorized: "Credenciais não reconhecidas",
        disabled_or_locked: "Conta não ativa ou bloqueada",
        new_email_be_different: "Novo e-mail precisa ser diferente do atual",
        new_password_be_different: "Nova senha precisa ser diferente da atual",
        insufficient_permissions: "Permissões insuficientes para esta operação",
    },
    social: SocialStrings {
        invalid_identifier: "Identificador inválido ou nulo",
        invalid_details: "Detalhes não pode ser muito grande",
    },
    stack: StackStrings {
        slug_or_name_not_sent: "Slug ou nome não informado",
        slug_already_exists: "Já existe uma stack com o slug gerado",
        name_field: "nome",
        meta_description_field: "meta descrição",
    },
};
