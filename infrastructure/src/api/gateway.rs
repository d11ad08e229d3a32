//! HTTP adapter for the discharge backend gateway port.

use super::client::ApiClient;
use async_trait::async_trait;
use careroute_application::ports::discharge_gateway::{DischargeGateway, GatewayError};
use careroute_domain::{AgentResponse, AgentType, CaseRequest, CompleteCase, RoutingDecision};
use tracing::instrument;

/// Gateway adapter over the JSON endpoints of the discharge backend.
pub struct HttpDischargeGateway {
    client: ApiClient,
}

impl HttpDischargeGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DischargeGateway for HttpDischargeGateway {
    #[instrument(skip_all)]
    async fn route_patient(&self, request: &CaseRequest) -> Result<RoutingDecision, GatewayError> {
        Ok(self.client.post_json("route-patient", request).await?)
    }

    #[instrument(skip_all)]
    async fn process_complete_case(
        &self,
        request: &CaseRequest,
    ) -> Result<CompleteCase, GatewayError> {
        Ok(self.client.post_json("process-complete-case", request).await?)
    }

    #[instrument(skip_all, fields(agent = %agent))]
    async fn process_agent(
        &self,
        agent: AgentType,
        request: &CaseRequest,
    ) -> Result<AgentResponse, GatewayError> {
        let path = format!("process-{}-agent", agent.as_str());
        Ok(self.client.post_json(&path, request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::ApiConfig;
    use careroute_application::CaseRequestBuilder;
    use careroute_domain::{CaregiverInputDraft, PatientData};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn gateway_for(server: &MockServer) -> HttpDischargeGateway {
        let config = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_secs: 5,
        };
        HttpDischargeGateway::new(ApiClient::new(&config).unwrap())
    }

    fn request() -> CaseRequest {
        let patient = PatientData::new("P1", "Jane Doe", "CHF");
        let draft = CaregiverInputDraft::new("needs hospital bed").with_services("dme");
        CaseRequestBuilder::build(&patient, &draft).unwrap()
    }

    #[tokio::test]
    async fn route_patient_decodes_decision() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/route-patient"))
            .and(body_partial_json(serde_json::json!({
                "caregiver_input": { "primary_concern": "needs hospital bed" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "patient_id": "P1",
                "recommended_agents": ["dme"],
                "reasoning": "equipment required",
                "priority_score": 6,
                "estimated_timeline": "Within 48 hours"
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server).await;
        let decision = gateway.route_patient(&request()).await.unwrap();
        assert_eq!(decision.recommended_agents, vec![AgentType::Dme]);
        assert_eq!(decision.priority_score, 6);
    }

    #[tokio::test]
    async fn agent_endpoint_path_is_derived_from_agent_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/process-pharmacy-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "agent_type": "pharmacy",
                "recommendations": ["Arrange home infusion"],
                "next_steps": [],
                "external_referrals": []
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server).await;
        let response = gateway
            .process_agent(AgentType::Pharmacy, &request())
            .await
            .unwrap();
        assert_eq!(response.agent_type, AgentType::Pharmacy);
        assert_eq!(response.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn non_2xx_maps_to_status_error_with_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/route-patient"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "routing model unavailable"})),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server).await;
        match gateway.route_patient(&request()).await.unwrap_err() {
            GatewayError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "routing model unavailable");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn schema_mismatch_maps_to_schema_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/process-dme-agent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"unexpected": "shape"})),
            )
            .mount(&server)
            .await;

        let gateway = gateway_for(&server).await;
        let err = gateway
            .process_agent(AgentType::Dme, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Schema(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn form_autofill_block_is_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/process-dme-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "agent_type": "dme",
                "recommendations": [],
                "next_steps": [],
                "external_referrals": [],
                "form_autofill": {
                    "patientName": "Jane Doe",
                    "equipmentType": "hospital-bed"
                }
            })))
            .mount(&server)
            .await;

        let gateway = gateway_for(&server).await;
        let response = gateway
            .process_agent(AgentType::Dme, &request())
            .await
            .unwrap();
        let autofill = response.form_autofill.unwrap();
        assert_eq!(autofill.get("equipmentType").unwrap(), "hospital-bed");
    }
}
