// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization types and services.
//!
//! A caller may fire a transition when two checks pass: their role is the
//! one the transition requires, and the institution they act for is the
//! one the request is linked to for that role.

use sigpae::Solicitacao;
use sigpae_audit::{Actor, Vinculo};
use sigpae_domain::{
    DomainError, InstitutionId, InstitutionKind, Rastro, SolicitacaoKind, TransitionName, Workflow,
};
use std::str::FromStr;

use crate::error::AuthError;

/// Caller roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// School staff: files and cancels school requests.
    Escola,
    /// Regional directorate: validates school requests, files unified kits.
    DiretoriaRegional,
    /// The nutrition authority: authorizes, denies and questions.
    Codae,
    /// The outsourced caterer: answers questions and acknowledges.
    Terceirizada,
    /// Scheduled jobs and integrations: expiry, outbox delivery, diet
    /// termination and procurement cancellations.
    Sistema,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Escola => "Escola",
            Self::DiretoriaRegional => "DiretoriaRegional",
            Self::Codae => "Codae",
            Self::Terceirizada => "Terceirizada",
            Self::Sistema => "Sistema",
        }
    }

    /// The institution kind a caller with this role acts for.
    #[must_use]
    pub const fn institution_kind(&self) -> Option<InstitutionKind> {
        match self {
            Self::Escola => Some(InstitutionKind::Escola),
            Self::DiretoriaRegional => Some(InstitutionKind::DiretoriaRegional),
            Self::Codae => Some(InstitutionKind::Codae),
            Self::Terceirizada => Some(InstitutionKind::Terceirizada),
            Self::Sistema => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "escola" => Ok(Self::Escola),
            "dre" | "diretoriaregional" => Ok(Self::DiretoriaRegional),
            "codae" => Ok(Self::Codae),
            "terceirizada" => Ok(Self::Terceirizada),
            "sistema" | "system" => Ok(Self::Sistema),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// The institution acted for; `None` only for [`Role::Sistema`].
    pub institution: Option<InstitutionId>,
}

impl AuthenticatedActor {
    /// Creates a caller acting for `institution`.
    #[must_use]
    pub fn new(id: &str, name: &str, role: Role, institution: InstitutionId) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
            institution: Some(institution),
        }
    }

    /// The caller used by scheduled jobs.
    #[must_use]
    pub fn system() -> Self {
        let actor: Actor = Actor::system();
        Self {
            id: actor.id,
            name: actor.name,
            role: Role::Sistema,
            institution: None,
        }
    }

    /// Converts this caller into the actor recorded in the transition log.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActor` if the id or name is blank, or
    /// if a non-system caller has no institution.
    pub fn to_audit_actor(&self) -> Result<Actor, DomainError> {
        match (self.role.institution_kind(), &self.institution) {
            (None, _) => Ok(Actor::system()),
            (Some(kind), Some(institution)) => Actor::new(
                &self.id,
                &self.name,
                Vinculo::new(kind, institution.clone()),
            ),
            (Some(_), None) => Err(DomainError::InvalidActor(format!(
                "{} sem instituição",
                self.id
            ))),
        }
    }
}

/// Authorization service for workflow actions.
pub struct AuthorizationService;

impl AuthorizationService {
    /// The role that may fire `name` in `workflow`.
    ///
    /// The logistics division acts as CODAE and the distributor as the
    /// caterer. Cancellations coming from the procurement system and the
    /// enrollment sync run as the system.
    #[must_use]
    pub const fn required_role(name: TransitionName, workflow: Workflow) -> Role {
        match name {
            TransitionName::IniciaFluxo => requester_role(workflow),
            TransitionName::Informa
            | TransitionName::EscolaRevisa
            | TransitionName::EscolaCancela
            | TransitionName::CancelarPedido
            | TransitionName::IniciaFluxoInativacao => Role::Escola,
            TransitionName::DreValida
            | TransitionName::DreNaoValida
            | TransitionName::DrePedeRevisao
            | TransitionName::DreRevisa
            | TransitionName::DreCancela => Role::DiretoriaRegional,
            TransitionName::CodaeAutoriza
            | TransitionName::CodaeAutorizaQuestionamento
            | TransitionName::CodaeNega
            | TransitionName::CodaeNegaQuestionamento
            | TransitionName::CodaeQuestiona
            | TransitionName::CodaePedeRevisao
            | TransitionName::NegarCancelamentoPedido
            | TransitionName::CodaeNegaInativacao
            | TransitionName::CodaeAutorizaInativacao
            | TransitionName::DilogAceitaAlteracao
            | TransitionName::DilogNegaAlteracao => Role::Codae,
            TransitionName::TerceirizadaRespondeQuestionamento
            | TransitionName::TerceirizadaTomaCiencia
            | TransitionName::TerceirizadaTomaCienciaInativacao
            | TransitionName::EmpresaAtende
            | TransitionName::SolicitaAlteracao
            | TransitionName::DistribuidorConfirmaCancelamento => Role::Terceirizada,
            TransitionName::CancelaAutomaticamente
            | TransitionName::CancelarAlunoMudouEscola
            | TransitionName::CancelarAlunoNaoPertenceRede
            | TransitionName::Termina
            | TransitionName::CancelaSolicitacao
            | TransitionName::AguardaConfirmacaoDeCancelamento => Role::Sistema,
        }
    }

    /// Checks that `actor` may fire `name` on `solicitacao`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for the wrong role and
    /// `AuthError::InstitutionMismatch` when the caller's institution is
    /// not the one linked to the request.
    pub fn authorize_transition(
        actor: &AuthenticatedActor,
        name: TransitionName,
        solicitacao: &Solicitacao,
    ) -> Result<(), AuthError> {
        let required: Role = Self::required_role(name, solicitacao.workflow());
        require_role(actor, required, name.as_str())?;
        require_link(actor, solicitacao.rastro(), name.as_str())
    }

    /// Checks that `actor` may file a request of `kind` for `rastro`.
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is not the requesting institution.
    pub fn authorize_create(
        actor: &AuthenticatedActor,
        kind: SolicitacaoKind,
        rastro: &Rastro,
    ) -> Result<(), AuthError> {
        require_role(actor, requester_role(kind.workflow()), "create_solicitacao")?;
        require_link(actor, rastro, "create_solicitacao")
    }

    /// Checks that `actor` may read `solicitacao` and its log.
    ///
    /// CODAE and the system read everything; other callers only what
    /// their institution is linked to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InstitutionMismatch` for an unrelated caller.
    pub fn authorize_read(
        actor: &AuthenticatedActor,
        solicitacao: &Solicitacao,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Codae | Role::Sistema => Ok(()),
            _ => require_link(actor, solicitacao.rastro(), "read_solicitacao"),
        }
    }

    /// Checks that `actor` is the system, for scheduled jobs.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for any other role.
    pub fn authorize_system(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        require_role(actor, Role::Sistema, action)
    }
}

const fn requester_role(workflow: Workflow) -> Role {
    match workflow {
        Workflow::PedidoAPartirDaDiretoriaRegional => Role::DiretoriaRegional,
        Workflow::PedidoAPartirDaEscola
        | Workflow::InformativoPartindoDaEscola
        | Workflow::DietaEspecial => Role::Escola,
        Workflow::SolicitacaoRemessa => Role::Codae,
    }
}

fn require_role(actor: &AuthenticatedActor, required: Role, action: &str) -> Result<(), AuthError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: required.to_string(),
        })
    }
}

fn require_link(actor: &AuthenticatedActor, rastro: &Rastro, action: &str) -> Result<(), AuthError> {
    let linked: Option<&InstitutionId> = match actor.role {
        Role::Escola => rastro.escola.as_ref(),
        Role::DiretoriaRegional => Some(&rastro.diretoria_regional),
        Role::Terceirizada => rastro.terceirizada.as_ref(),
        Role::Codae | Role::Sistema => return Ok(()),
    };

    match (linked, actor.institution.as_ref()) {
        (Some(linked), Some(institution)) if linked == institution => Ok(()),
        _ => Err(AuthError::InstitutionMismatch {
            action: action.to_string(),
            institution: actor
                .institution
                .as_ref()
                .map_or_else(String::new, |id| id.as_str().to_string()),
        }),
    }
}
