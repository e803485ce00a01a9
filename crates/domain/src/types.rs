// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::workflow::Workflow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::Date;
use uuid::Uuid;

/// Identifier of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolicitacaoId(Uuid);

impl SolicitacaoId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short identifier shown to people: the first five hex digits, upper-cased.
    #[must_use]
    pub fn id_externo(&self) -> String {
        self.0.simple().to_string()[..5].to_uppercase()
    }
}

impl Default for SolicitacaoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolicitacaoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SolicitacaoId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidSolicitacaoId(s.to_string()))
    }
}

/// The kind of institution an actor or a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstitutionKind {
    Escola,
    DiretoriaRegional,
    Codae,
    Terceirizada,
}

impl InstitutionKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Escola => "escola",
            Self::DiretoriaRegional => "diretoria_regional",
            Self::Codae => "codae",
            Self::Terceirizada => "terceirizada",
        }
    }
}

impl std::fmt::Display for InstitutionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstitutionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "escola" => Ok(Self::Escola),
            "diretoria_regional" | "dre" => Ok(Self::DiretoriaRegional),
            "codae" => Ok(Self::Codae),
            "terceirizada" => Ok(Self::Terceirizada),
            _ => Err(DomainError::UnknownInstitutionKind(s.to_string())),
        }
    }
}

/// Identifier of a school, directorate or caterer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(String);

impl InstitutionId {
    /// Creates an institution identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInstitution` if the identifier is blank.
    pub fn new(id: &str) -> Result<Self, DomainError> {
        let trimmed: &str = id.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInstitution(id.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The institutions a request passes through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rastro {
    /// Absent for requests raised by a directorate and for delivery
    /// requisitions.
    pub escola: Option<InstitutionId>,
    /// For delivery requisitions, the directorate the deliveries serve.
    pub diretoria_regional: InstitutionId,
    /// The caterer serving the school's lot, when one is assigned, or the
    /// distributor of a delivery requisition.
    pub terceirizada: Option<InstitutionId>,
}

/// The concrete request types that plug into the workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolicitacaoKind {
    AlteracaoCardapio,
    InversaoCardapio,
    InclusaoAlimentacaoNormal,
    InclusaoAlimentacaoContinua,
    KitLanche,
    KitLancheUnificado,
    SuspensaoAlimentacao,
    SolicitacaoDietaEspecial,
    /// A delivery requisition; the distributor is the linked caterer.
    SolicitacaoRemessa,
}

impl SolicitacaoKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlteracaoCardapio => "alteracao_cardapio",
            Self::InversaoCardapio => "inversao_cardapio",
            Self::InclusaoAlimentacaoNormal => "inclusao_alimentacao_normal",
            Self::InclusaoAlimentacaoContinua => "inclusao_alimentacao_continua",
            Self::KitLanche => "kit_lanche",
            Self::KitLancheUnificado => "kit_lanche_unificado",
            Self::SuspensaoAlimentacao => "suspensao_alimentacao",
            Self::SolicitacaoDietaEspecial => "solicitacao_dieta_especial",
            Self::SolicitacaoRemessa => "solicitacao_remessa",
        }
    }

    /// Name used in notification titles.
    #[must_use]
    pub const fn descricao(&self) -> &'static str {
        match self {
            Self::AlteracaoCardapio => "Alteração do tipo de Alimentação",
            Self::InversaoCardapio => "Inversão de dia de Cardápio",
            Self::InclusaoAlimentacaoNormal | Self::InclusaoAlimentacaoContinua => {
                "Inclusão de Alimentação"
            }
            Self::KitLanche => "Kit Lanche Passeio",
            Self::KitLancheUnificado => "Kit Lanche Unificado",
            Self::SuspensaoAlimentacao => "Suspensão de Alimentação",
            Self::SolicitacaoDietaEspecial => "Dieta Especial",
            Self::SolicitacaoRemessa => "Requisição de Entrega",
        }
    }

    #[must_use]
    pub const fn workflow(&self) -> Workflow {
        match self {
            Self::AlteracaoCardapio
            | Self::InversaoCardapio
            | Self::InclusaoAlimentacaoNormal
            | Self::InclusaoAlimentacaoContinua
            | Self::KitLanche => Workflow::PedidoAPartirDaEscola,
            Self::KitLancheUnificado => Workflow::PedidoAPartirDaDiretoriaRegional,
            Self::SuspensaoAlimentacao => Workflow::InformativoPartindoDaEscola,
            Self::SolicitacaoDietaEspecial => Workflow::DietaEspecial,
            Self::SolicitacaoRemessa => Workflow::SolicitacaoRemessa,
        }
    }

    /// Minimum business days of notice for a cancellation, if any.
    #[must_use]
    pub const fn minimum_cancellation_notice(&self) -> Option<u32> {
        match self {
            Self::SolicitacaoDietaEspecial | Self::SolicitacaoRemessa => None,
            _ => Some(2),
        }
    }

    /// Returns true if individual dates of the request can be cancelled
    /// on their own.
    #[must_use]
    pub const fn has_dated_occurrences(&self) -> bool {
        matches!(
            self,
            Self::AlteracaoCardapio | Self::InclusaoAlimentacaoNormal | Self::SuspensaoAlimentacao
        )
    }
}

impl std::fmt::Display for SolicitacaoKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolicitacaoKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "alteracao_cardapio" => Ok(Self::AlteracaoCardapio),
            "inversao_cardapio" => Ok(Self::InversaoCardapio),
            "inclusao_alimentacao_normal" => Ok(Self::InclusaoAlimentacaoNormal),
            "inclusao_alimentacao_continua" => Ok(Self::InclusaoAlimentacaoContinua),
            "kit_lanche" => Ok(Self::KitLanche),
            "kit_lanche_unificado" => Ok(Self::KitLancheUnificado),
            "suspensao_alimentacao" => Ok(Self::SuspensaoAlimentacao),
            "solicitacao_dieta_especial" | "dieta_especial" => Ok(Self::SolicitacaoDietaEspecial),
            "solicitacao_remessa" | "remessa" => Ok(Self::SolicitacaoRemessa),
            _ => Err(DomainError::UnknownSolicitacaoKind(s.to_string())),
        }
    }
}

/// One dated occurrence of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOcorrencia {
    pub data: Date,
    pub cancelado: bool,
    pub cancelado_justificativa: Option<String>,
}

impl DataOcorrencia {
    #[must_use]
    pub const fn new(data: Date) -> Self {
        Self {
            data,
            cancelado: false,
            cancelado_justificativa: None,
        }
    }
}

/// The non-empty, sorted, duplicate-free dates of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DataOcorrencia>", into = "Vec<DataOcorrencia>")]
pub struct Datas(Vec<DataOcorrencia>);

impl Datas {
    /// Builds the collection from occurrences in any order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyDates` for an empty input and
    /// `DomainError::DuplicateDate` when a date repeats.
    pub fn new(mut occurrences: Vec<DataOcorrencia>) -> Result<Self, DomainError> {
        if occurrences.is_empty() {
            return Err(DomainError::EmptyDates);
        }
        occurrences.sort_by_key(|occurrence| occurrence.data);
        if let Some(pair) = occurrences
            .windows(2)
            .find(|pair| pair[0].data == pair[1].data)
        {
            return Err(DomainError::DuplicateDate { date: pair[0].data });
        }
        Ok(Self(occurrences))
    }

    /// Builds the collection from plain dates, none cancelled.
    ///
    /// # Errors
    ///
    /// Same as [`Datas::new`].
    pub fn from_dates(dates: impl IntoIterator<Item = Date>) -> Result<Self, DomainError> {
        Self::new(dates.into_iter().map(DataOcorrencia::new).collect())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[DataOcorrencia] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn data_inicial(&self) -> Date {
        self.0[0].data
    }

    #[must_use]
    pub fn data_final(&self) -> Date {
        self.0[self.0.len() - 1].data
    }

    /// The earliest date still standing, or the first date when every
    /// occurrence has been cancelled.
    #[must_use]
    pub fn event_date(&self) -> Date {
        self.0
            .iter()
            .find(|occurrence| !occurrence.cancelado)
            .map_or_else(|| self.data_inicial(), |occurrence| occurrence.data)
    }

    #[must_use]
    pub fn get(&self, date: Date) -> Option<&DataOcorrencia> {
        self.0
            .binary_search_by_key(&date, |occurrence| occurrence.data)
            .ok()
            .map(|index| &self.0[index])
    }

    #[must_use]
    pub fn cancelled_dates(&self) -> BTreeSet<Date> {
        self.0
            .iter()
            .filter(|occurrence| occurrence.cancelado)
            .map(|occurrence| occurrence.data)
            .collect()
    }

    /// Marks the given dates cancelled. Dates not in the collection are
    /// ignored; callers validate membership first.
    pub fn cancel(&mut self, dates: &BTreeSet<Date>, justificativa: &str) {
        for occurrence in &mut self.0 {
            if dates.contains(&occurrence.data) {
                occurrence.cancelado = true;
                occurrence.cancelado_justificativa = Some(justificativa.to_string());
            }
        }
    }
}

impl TryFrom<Vec<DataOcorrencia>> for Datas {
    type Error = DomainError;

    fn try_from(occurrences: Vec<DataOcorrencia>) -> Result<Self, Self::Error> {
        Self::new(occurrences)
    }
}

impl From<Datas> for Vec<DataOcorrencia> {
    fn from(datas: Datas) -> Self {
        datas.0
    }
}
