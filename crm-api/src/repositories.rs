use crate::endpoints::{
    PageQuery,
    agent_settings::{
        AgentPersonality, CreateAgentSetting, DeleteAgentSetting, GetAgentSetting,
        GetAgentSettingByType, GetRecentAgentActions, ListAgentActions, ListAgentSettings,
        TestAgentEmail, ToggleAgent, UpdateAgentSettingByType,
    },
    companies::{
        CreateCompany, DeleteCompany, GetCompany, ListCompanies, ListCompanyContacts,
        UpdateCompany,
    },
    contacts::{CreateContact, DeleteContact, GetContact, ListContacts, UpdateContact},
    conversations::{
        CreateConversation, DeleteConversation, GetConversation, ListConversations,
        UpdateConversation,
    },
    meetings::{
        CreateMeeting, DeleteMeeting, GetMeeting, ListMeetings, ProcessMeeting, UpdateMeeting,
    },
    products::{
        CreateProduct, DeleteDocument, DeleteProduct, GetDocumentDetail, GetDocumentSections,
        GetProduct, ListProductDocuments, ListProducts, SearchDocuments, UpdateProduct,
        UploadDocument,
    },
    projects::{
        AddProjectContact, CreateProject, DeleteProject, GetProject, ListProjectContacts,
        ListProjectFlows, ListProjects, RemoveProjectContact, UpdateProject,
    },
    sales_flows::{
        AssignFlowToProject, CreateSalesFlow, DeleteSalesFlow, GetSalesFlow, ListSalesFlows,
        RemoveFlowFromProject, UpdateProjectFlowStatus, UpdateSalesFlow,
    },
    users::{GetCurrentUser, UpdateCurrentUser},
};

pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn me(&self) -> GetCurrentUser {
        GetCurrentUser::new()
    }

    pub fn update_me(&self) -> UpdateCurrentUser {
        UpdateCurrentUser::new()
    }
}

#[derive(Default)]
pub struct ContactRepository {
    page: PageQuery,
}

impl ContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub fn list(&self) -> ListContacts {
        ListContacts::new().page(self.page)
    }

    pub fn get(&self, id: i64) -> GetContact {
        GetContact::new(id)
    }

    pub fn create(&self, name: impl Into<String>, email: impl Into<String>) -> CreateContact {
        CreateContact::new(name, email)
    }

    pub fn update(&self, id: i64) -> UpdateContact {
        UpdateContact::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteContact {
        DeleteContact::new(id)
    }
}

#[derive(Default)]
pub struct CompanyRepository {
    page: PageQuery,
}

impl CompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub fn list(&self) -> ListCompanies {
        ListCompanies::new().page(self.page)
    }

    pub fn get(&self, id: i64) -> GetCompany {
        GetCompany::new(id)
    }

    pub fn create(&self, name: impl Into<String>) -> CreateCompany {
        CreateCompany::new(name)
    }

    pub fn update(&self, id: i64) -> UpdateCompany {
        UpdateCompany::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteCompany {
        DeleteCompany::new(id)
    }

    pub fn contacts(&self, company_id: i64) -> ListCompanyContacts {
        ListCompanyContacts::new(company_id).page(self.page)
    }
}

#[derive(Default)]
pub struct ProjectRepository {
    page: PageQuery,
}

impl ProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub fn list(&self) -> ListProjects {
        ListProjects::new().page(self.page)
    }

    pub fn get(&self, id: i64) -> GetProject {
        GetProject::new(id)
    }

    pub fn create(&self, name: impl Into<String>) -> CreateProject {
        CreateProject::new(name)
    }

    pub fn update(&self, id: i64) -> UpdateProject {
        UpdateProject::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteProject {
        DeleteProject::new(id)
    }

    pub fn flows(&self, project_id: i64) -> ListProjectFlows {
        ListProjectFlows::new(project_id)
    }

    pub fn assign_flow(&self, project_id: i64, flow_id: i64) -> AssignFlowToProject {
        AssignFlowToProject::new(project_id, flow_id)
    }

    pub fn update_flow_status(
        &self,
        project_id: i64,
        flow_id: i64,
        status: impl Into<String>,
    ) -> UpdateProjectFlowStatus {
        UpdateProjectFlowStatus::new(project_id, flow_id, status)
    }

    pub fn remove_flow(&self, project_id: i64, flow_id: i64) -> RemoveFlowFromProject {
        RemoveFlowFromProject::new(project_id, flow_id)
    }

    pub fn contacts(&self, project_id: i64) -> ListProjectContacts {
        ListProjectContacts::new(project_id).page(self.page)
    }

    pub fn add_contact(&self, project_id: i64, contact_id: i64) -> AddProjectContact {
        AddProjectContact::new(project_id, contact_id)
    }

    pub fn remove_contact(&self, project_id: i64, contact_id: i64) -> RemoveProjectContact {
        RemoveProjectContact::new(project_id, contact_id)
    }
}

#[derive(Default)]
pub struct ConversationRepository {
    contact_id: Option<i64>,
}

impl ConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contact(mut self, contact_id: i64) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn list(&self) -> ListConversations {
        let list = ListConversations::new();
        match self.contact_id {
            Some(id) => list.contact_id(id),
            None => list,
        }
    }

    pub fn get(&self, id: i64) -> GetConversation {
        GetConversation::new(id)
    }

    pub fn create(&self) -> CreateConversation {
        let create = CreateConversation::new();
        match self.contact_id {
            Some(id) => create.contact_id(id),
            None => create,
        }
    }

    pub fn update(&self, id: i64) -> UpdateConversation {
        UpdateConversation::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteConversation {
        DeleteConversation::new(id)
    }
}

#[derive(Default)]
pub struct MeetingRepository {
    conversation_id: Option<i64>,
}

impl MeetingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversation(mut self, conversation_id: i64) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }

    pub fn list(&self) -> ListMeetings {
        let list = ListMeetings::new();
        match self.conversation_id {
            Some(id) => list.conversation_id(id),
            None => list,
        }
    }

    pub fn get(&self, id: i64) -> GetMeeting {
        GetMeeting::new(id)
    }

    pub fn create(&self, title: impl Into<String>) -> CreateMeeting {
        let create = CreateMeeting::new(title);
        match self.conversation_id {
            Some(id) => create.conversation_id(id),
            None => create,
        }
    }

    pub fn update(&self, id: i64) -> UpdateMeeting {
        UpdateMeeting::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteMeeting {
        DeleteMeeting::new(id)
    }

    pub fn process(&self, id: i64) -> ProcessMeeting {
        ProcessMeeting::new(id)
    }
}

#[derive(Default)]
pub struct SalesFlowRepository {
    page: PageQuery,
}

impl SalesFlowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub fn list(&self) -> ListSalesFlows {
        ListSalesFlows::new().page(self.page)
    }

    pub fn get(&self, id: i64) -> GetSalesFlow {
        GetSalesFlow::new(id)
    }

    pub fn create(&self, name: impl Into<String>) -> CreateSalesFlow {
        CreateSalesFlow::new(name)
    }

    pub fn update(&self, id: i64) -> UpdateSalesFlow {
        UpdateSalesFlow::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteSalesFlow {
        DeleteSalesFlow::new(id)
    }
}

#[derive(Default)]
pub struct ProductRepository {
    page: PageQuery,
}

impl ProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageQuery) -> Self {
        self.page = page;
        self
    }

    pub fn list(&self) -> ListProducts {
        ListProducts::new().page(self.page)
    }

    pub fn get(&self, id: i64) -> GetProduct {
        GetProduct::new(id)
    }

    pub fn create(&self, name: impl Into<String>) -> CreateProduct {
        CreateProduct::new(name)
    }

    pub fn update(&self, id: i64) -> UpdateProduct {
        UpdateProduct::new(id)
    }

    pub fn delete(&self, id: i64) -> DeleteProduct {
        DeleteProduct::new(id)
    }

    pub fn documents(&self, product_id: i64) -> ListProductDocuments {
        ListProductDocuments::new(product_id).page(self.page)
    }

    pub fn upload_document(
        &self,
        product_id: i64,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> UploadDocument {
        UploadDocument::new(product_id, file_name, bytes)
    }

    pub fn document_detail(&self, document_id: i64) -> GetDocumentDetail {
        GetDocumentDetail::new(document_id)
    }

    pub fn delete_document(&self, document_id: i64) -> DeleteDocument {
        DeleteDocument::new(document_id)
    }

    pub fn document_sections(&self, document_id: i64) -> GetDocumentSections {
        GetDocumentSections::new(document_id)
    }

    pub fn search_documents(&self, product_id: i64, query: impl Into<String>) -> SearchDocuments {
        SearchDocuments::new(product_id, query)
    }
}

pub struct AgentRepository;

impl AgentRepository {
    pub fn new() -> Self {
        Self {}
    }

    pub fn list(&self) -> ListAgentSettings {
        ListAgentSettings::new()
    }

    pub fn get(&self, id: i64) -> GetAgentSetting {
        GetAgentSetting::new(id)
    }

    pub fn get_by_type(&self, agent_type: impl Into<String>) -> GetAgentSettingByType {
        GetAgentSettingByType::new(agent_type)
    }

    pub fn create(&self, agent_type: impl Into<String>) -> CreateAgentSetting {
        CreateAgentSetting::new(agent_type)
    }

    pub fn update_by_type(&self, agent_type: impl Into<String>) -> UpdateAgentSettingByType {
        UpdateAgentSettingByType::new(agent_type)
    }

    pub fn delete(&self, id: i64) -> DeleteAgentSetting {
        DeleteAgentSetting::new(id)
    }

    pub fn actions(&self) -> ListAgentActions {
        ListAgentActions::new()
    }

    pub fn recent_actions(&self, agent_id: i64) -> GetRecentAgentActions {
        GetRecentAgentActions::new(agent_id)
    }

    pub fn update_personality(
        &self,
        agent_type: impl Into<String>,
        personality: AgentPersonality,
    ) -> UpdateAgentSettingByType {
        UpdateAgentSettingByType::new(agent_type).personality(personality)
    }

    pub fn toggle(&self, agent_id: i64, is_active: bool) -> ToggleAgent {
        ToggleAgent::new(agent_id, is_active)
    }

    pub fn test_email(
        &self,
        agent_id: i64,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> TestAgentEmail {
        TestAgentEmail::new(agent_id, from_email, subject, body)
    }
}
