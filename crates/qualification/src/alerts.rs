//! Alert and sub-field resolution for the current answers

use visa_crm_config::{Alert, Question, ServiceDefinition, Step, SubField};
use visa_crm_core::AnswerMap;

/// An alert triggered by a selected option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveAlert<'a> {
    pub step_id: &'a str,
    pub question_id: &'a str,
    pub option_value: &'a str,
    pub alert: &'a Alert,
}

/// Alerts for every answered question of the service, in catalog order
pub fn active_alerts<'a>(
    service: &'a ServiceDefinition,
    answers: &AnswerMap,
) -> Vec<ActiveAlert<'a>> {
    service
        .steps
        .iter()
        .flat_map(|step| step_alerts(step, answers))
        .collect()
}

/// Alerts for the answered questions of one step
pub fn step_alerts<'a>(step: &'a Step, answers: &AnswerMap) -> Vec<ActiveAlert<'a>> {
    step.questions
        .iter()
        .filter_map(|question| {
            let value = answers.get(&question.id)?;
            let (option_value, alert) = question.alerts.get_key_value(value)?;
            Some(ActiveAlert {
                step_id: &step.id,
                question_id: &question.id,
                option_value,
                alert,
            })
        })
        .collect()
}

/// Sub-fields of `question` revealed by its current answer
pub fn visible_sub_fields<'a>(question: &'a Question, answers: &AnswerMap) -> &'a [SubField] {
    match answers.get(&question.id) {
        Some(value) => question.sub_fields_for(value),
        None => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visa_crm_config::{AlertSeverity, ServiceCatalog};
    use visa_crm_core::ServiceKey;

    #[test]
    fn test_alerts_follow_catalog_order() {
        let catalog = ServiceCatalog::builtin();
        let spain = catalog.service(ServiceKey::Spain).unwrap();
        let answers: AnswerMap = [
            ("sabika", "emin_degil"),
            ("oturum_amac", "dijital"),
            ("kac_kisi_isp", "2"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let alerts = active_alerts(spain, &answers);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].question_id, "oturum_amac");
        assert_eq!(alerts[0].alert.severity, AlertSeverity::Green);
        assert_eq!(alerts[1].question_id, "sabika");
        assert_eq!(alerts[1].step_id, "i4");

        let first_step = step_alerts(&spain.steps[0], &answers);
        assert_eq!(first_step.len(), 1);
    }

    #[test]
    fn test_sub_fields_follow_answer() {
        let catalog = ServiceCatalog::builtin();
        let schengen = catalog.service(ServiceKey::Schengen).unwrap();
        let question = schengen.question("red_gecmisi").unwrap();

        let mut answers = AnswerMap::new();
        assert!(visible_sub_fields(question, &answers).is_empty());

        answers.insert("red_gecmisi".into(), "yok".into());
        assert!(visible_sub_fields(question, &answers).is_empty());

        answers.insert("red_gecmisi".into(), "diger_red".into());
        let fields = visible_sub_fields(question, &answers);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].id, "red_kac_ay");
    }
}
