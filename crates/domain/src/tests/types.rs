// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DataOcorrencia, Datas, DomainError, InstitutionId, InstitutionKind, SolicitacaoId,
    SolicitacaoKind, Workflow,
};
use std::collections::BTreeSet;
use time::macros::date;
use uuid::Uuid;

#[test]
fn test_id_externo_is_first_five_hex_digits_uppercased() {
    let uuid: Uuid = Uuid::parse_str("2b8c4ef1-0000-4000-8000-000000000000").unwrap();
    let id: SolicitacaoId = SolicitacaoId::from_uuid(uuid);
    assert_eq!(id.id_externo(), "2B8C4");
}

#[test]
fn test_solicitacao_id_parse() {
    let id: SolicitacaoId = SolicitacaoId::new();
    assert_eq!(id.to_string().parse::<SolicitacaoId>().unwrap(), id);
    assert!(matches!(
        "not-a-uuid".parse::<SolicitacaoId>(),
        Err(DomainError::InvalidSolicitacaoId(_))
    ));
}

#[test]
fn test_institution_id_rejects_blank() {
    assert!(InstitutionId::new("  ").is_err());
    assert_eq!(InstitutionId::new(" EMEF 1 ").unwrap().as_str(), "EMEF 1");
}

#[test]
fn test_institution_kind_aliases() {
    assert_eq!(
        "dre".parse::<InstitutionKind>().unwrap(),
        InstitutionKind::DiretoriaRegional
    );
    assert_eq!(
        "diretoria-regional".parse::<InstitutionKind>().unwrap(),
        InstitutionKind::DiretoriaRegional
    );
}

#[test]
fn test_kind_workflows() {
    assert_eq!(
        SolicitacaoKind::InclusaoAlimentacaoNormal.workflow(),
        Workflow::PedidoAPartirDaEscola
    );
    assert_eq!(
        SolicitacaoKind::KitLancheUnificado.workflow(),
        Workflow::PedidoAPartirDaDiretoriaRegional
    );
    assert_eq!(
        SolicitacaoKind::SuspensaoAlimentacao.workflow(),
        Workflow::InformativoPartindoDaEscola
    );
    assert_eq!(
        SolicitacaoKind::SolicitacaoDietaEspecial.workflow(),
        Workflow::DietaEspecial
    );
    assert_eq!(
        SolicitacaoKind::SolicitacaoRemessa.workflow(),
        Workflow::SolicitacaoRemessa
    );
    assert!(SolicitacaoKind::AlteracaoCardapio.has_dated_occurrences());
    assert!(!SolicitacaoKind::InversaoCardapio.has_dated_occurrences());
    assert!(!SolicitacaoKind::SolicitacaoDietaEspecial.has_dated_occurrences());
}

#[test]
fn test_cancellation_notice_by_kind() {
    assert_eq!(SolicitacaoKind::KitLanche.minimum_cancellation_notice(), Some(2));
    assert_eq!(
        SolicitacaoKind::SolicitacaoDietaEspecial.minimum_cancellation_notice(),
        None
    );
    assert_eq!(
        SolicitacaoKind::SolicitacaoRemessa.minimum_cancellation_notice(),
        None
    );
}

#[test]
fn test_kind_aliases() {
    assert_eq!(
        "dieta_especial".parse::<SolicitacaoKind>().unwrap(),
        SolicitacaoKind::SolicitacaoDietaEspecial
    );
    assert_eq!(
        "remessa".parse::<SolicitacaoKind>().unwrap(),
        SolicitacaoKind::SolicitacaoRemessa
    );
    assert_eq!(
        "solicitacao-remessa".parse::<SolicitacaoKind>().unwrap(),
        SolicitacaoKind::SolicitacaoRemessa
    );
}

#[test]
fn test_datas_are_sorted() {
    let datas: Datas = Datas::from_dates([
        date!(2022 - 02 - 10),
        date!(2022 - 02 - 07),
        date!(2022 - 02 - 08),
    ])
    .unwrap();
    assert_eq!(datas.data_inicial(), date!(2022 - 02 - 07));
    assert_eq!(datas.data_final(), date!(2022 - 02 - 10));
    assert_eq!(datas.len(), 3);
}

#[test]
fn test_datas_reject_empty_and_duplicates() {
    assert_eq!(Datas::new(Vec::new()), Err(DomainError::EmptyDates));
    assert_eq!(
        Datas::from_dates([date!(2022 - 02 - 07), date!(2022 - 02 - 07)]),
        Err(DomainError::DuplicateDate {
            date: date!(2022 - 02 - 07)
        })
    );
}

#[test]
fn test_cancel_marks_only_given_dates() {
    let mut datas: Datas = Datas::from_dates([
        date!(2022 - 02 - 07),
        date!(2022 - 02 - 08),
        date!(2022 - 02 - 09),
    ])
    .unwrap();
    let targets: BTreeSet<_> = [date!(2022 - 02 - 07)].into_iter().collect();
    datas.cancel(&targets, "Passeio adiado");

    let first: &DataOcorrencia = datas.get(date!(2022 - 02 - 07)).unwrap();
    assert!(first.cancelado);
    assert_eq!(first.cancelado_justificativa.as_deref(), Some("Passeio adiado"));
    assert!(!datas.get(date!(2022 - 02 - 08)).unwrap().cancelado);
    assert_eq!(datas.cancelled_dates(), targets);
    assert_eq!(datas.event_date(), date!(2022 - 02 - 08));
}

#[test]
fn test_event_date_falls_back_when_all_cancelled() {
    let mut datas: Datas = Datas::from_dates([date!(2022 - 02 - 07)]).unwrap();
    let targets: BTreeSet<_> = [date!(2022 - 02 - 07)].into_iter().collect();
    datas.cancel(&targets, "x");
    assert_eq!(datas.event_date(), date!(2022 - 02 - 07));
}

#[test]
fn test_datas_deserialize_validates() {
    let json: &str = r#"[{"data":"2022-02-07","cancelado":false,"cancelado_justificativa":null},
                        {"data":"2022-02-07","cancelado":false,"cancelado_justificativa":null}]"#;
    assert!(serde_json::from_str::<Datas>(json).is_err());
}
