use std::fmt::Debug;
use std::sync::Arc;

use holo_hash::{ActionHash, AgentPubKey, EntryHash};
use serde::{de::DeserializeOwned, Serialize};
use tracing::instrument;

use crate::api::{CellId, ExternIO, FunctionName, InstalledAppId, ZomeCall, ZomeName};
use crate::interface::{DynAdminInterface, DynAppInterface};
use crate::types::{
    Annotation, AnnotationOutput, HolochainOutput, PaperOutput, SensemakerOutput,
    StateMachineInput, StepStateMachineInput,
};
use crate::{AdminWebsocket, AppWebsocket, ClientConfig, ConductorApiError, ConductorApiResult};

/// Typed access to the paperz zome of a single cell.
///
/// Every operation goes through [PaperzClient::call_zome], which addresses
/// the held cell and zome. Calls carry no capability secret: holding the
/// app connection is the only authorization, and the provenance is always
/// the cell's own agent.
///
/// The client holds no mutable state and is cheap to clone, so it can be
/// shared between tasks freely. Concurrent writes to the same state
/// machine path are ordered by the node alone.
#[derive(Clone)]
pub struct PaperzClient {
    admin: DynAdminInterface,
    app: DynAppInterface,
    cell_id: CellId,
    zome_name: ZomeName,
}

impl std::fmt::Debug for PaperzClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperzClient")
            .field("cell_id", &self.cell_id)
            .field("zome_name", &self.zome_name)
            .finish()
    }
}

impl PaperzClient {
    /// Connect to a node on localhost and target the first cell of the
    /// `test-app` app.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() {
    /// use paperz_client::PaperzClient;
    ///
    /// let client = PaperzClient::initialize(8888, 9999).await.unwrap();
    /// let papers = client.get_all_paperz().await.unwrap();
    /// # }
    /// ```
    pub async fn initialize(app_port: u16, admin_port: u16) -> ConductorApiResult<Self> {
        Self::initialize_with_config(&ClientConfig::new(app_port, admin_port)).await
    }

    /// Connect both interfaces described by `config` and discover the
    /// target cell.
    ///
    /// Nothing is returned unless both connections are up and the app
    /// has at least one cell.
    #[instrument(skip_all, fields(app_port = config.app_port, admin_port = config.admin_port))]
    pub async fn initialize_with_config(config: &ClientConfig) -> ConductorApiResult<Self> {
        let app = AppWebsocket::connect(config.app_url()?).await?;
        let admin = AdminWebsocket::connect(config.admin_url()?).await?;
        Self::from_interfaces(Arc::new(app), Arc::new(admin), config).await
    }

    /// Discover the target cell over already connected interfaces.
    pub async fn from_interfaces(
        app: DynAppInterface,
        admin: DynAdminInterface,
        config: &ClientConfig,
    ) -> ConductorApiResult<Self> {
        let cell_id = discover_cell(&app, &config.installed_app_id).await?;
        tracing::debug!(%cell_id, installed_app_id = %config.installed_app_id, "Discovered cell");
        Ok(Self::new(admin, app, cell_id, config.zome_name.clone()))
    }

    /// Build a client from its parts, without asking the node anything.
    pub fn new(
        admin: DynAdminInterface,
        app: DynAppInterface,
        cell_id: CellId,
        zome_name: ZomeName,
    ) -> Self {
        Self {
            admin,
            app,
            cell_id,
            zome_name,
        }
    }

    /// The cell every call is addressed to.
    pub fn cell_id(&self) -> &CellId {
        &self.cell_id
    }

    /// The agent calls are made as.
    pub fn agent_pubkey(&self) -> &AgentPubKey {
        self.cell_id.agent_pubkey()
    }

    pub fn zome_name(&self) -> &ZomeName {
        &self.zome_name
    }

    pub fn app(&self) -> &DynAppInterface {
        &self.app
    }

    pub fn admin(&self) -> &DynAdminInterface {
        &self.admin
    }

    /// Call `fn_name` on the target zome and decode its result as `O`.
    ///
    /// A result that does not decode as `O` is a [ConductorApiError::DecodeError].
    /// Errors from the node or the connection are returned as they are.
    #[instrument(skip(self, payload), fields(zome_name = %self.zome_name))]
    pub async fn call_zome<I, O>(&self, fn_name: &str, payload: I) -> ConductorApiResult<O>
    where
        I: Serialize + Debug,
        O: DeserializeOwned + Debug,
    {
        tracing::trace!(?payload);
        let fn_name = FunctionName::from(fn_name);
        let payload = ExternIO::encode(payload).map_err(|source| ConductorApiError::EncodeError {
            fn_name: fn_name.clone(),
            source,
        })?;
        let call = ZomeCall {
            cell_id: self.cell_id.clone(),
            zome_name: self.zome_name.clone(),
            fn_name: fn_name.clone(),
            payload,
            cap_secret: None,
            provenance: self.cell_id.agent_pubkey().clone(),
        };
        let output = self.app.zome_call(call).await?;
        output
            .decode()
            .map_err(|source| ConductorApiError::DecodeError { fn_name, source })
    }

    /// Tell the zome which cell hosts the sensemaker.
    pub async fn set_sensemaker_cell_id(&self, cell_id: CellId) -> ConductorApiResult<()> {
        self.call_zome("set_sensemaker_cell_id", cell_id).await
    }

    /// The sensemaker cell the zome bridges to, `None` until one is set.
    pub async fn get_sensemaker_cell_id(&self) -> ConductorApiResult<Option<CellId>> {
        self.call_zome("get_sensemaker_cell_id", ()).await
    }

    /// Every paper, in the order the node returns them.
    pub async fn get_all_paperz(&self) -> ConductorApiResult<Vec<PaperOutput>> {
        self.call_zome("get_all_paperz", ()).await
    }

    pub async fn get_annotations_for_paper(
        &self,
        paper_entry_hash: EntryHash,
    ) -> ConductorApiResult<Vec<AnnotationOutput>> {
        self.call_zome("get_annotations_for_paper", paper_entry_hash).await
    }

    /// Store a paper and return the hash of the creating action.
    ///
    /// The payload is usually a [Paper](crate::types::Paper), but its
    /// shape is only checked by the zome.
    pub async fn upload_paper<P>(&self, payload: P) -> ConductorApiResult<ActionHash>
    where
        P: Serialize + Debug,
    {
        self.call_zome("upload_paper", payload).await
    }

    /// Store an annotation. The zome also forwards it to the sensemaker,
    /// only the ledger receipt is returned.
    pub async fn create_annotation(
        &self,
        annotation: Annotation,
    ) -> ConductorApiResult<HolochainOutput> {
        self.call_zome("create_annotation", annotation).await
    }

    /// The init expression bound at `path`.
    pub async fn get_state_machine_init(
        &self,
        path: &str,
    ) -> ConductorApiResult<Option<SensemakerOutput>> {
        self.call_zome("get_state_machine_init", path).await
    }

    /// The comp expression bound at `path`.
    pub async fn get_state_machine_comp(
        &self,
        path: &str,
    ) -> ConductorApiResult<Option<SensemakerOutput>> {
        self.call_zome("get_state_machine_comp", path).await
    }

    /// The state currently held for `target_entry_hash`.
    pub async fn get_state_machine_data(
        &self,
        target_entry_hash: EntryHash,
    ) -> ConductorApiResult<Option<SensemakerOutput>> {
        self.call_zome("get_state_machine_data", target_entry_hash).await
    }

    /// Bind a comp expression at `path`. `false` means the node rejected it.
    pub async fn set_state_machine_comp(&self, path: &str, expr: &str) -> ConductorApiResult<bool> {
        self.call_zome("set_state_machine_comp", StateMachineInput::new(path, expr))
            .await
    }

    /// Bind an init expression at `path`. `false` means the node rejected it.
    pub async fn set_state_machine_init(&self, path: &str, expr: &str) -> ConductorApiResult<bool> {
        self.call_zome("set_state_machine_init", StateMachineInput::new(path, expr))
            .await
    }

    /// Apply `action` to the state held for `entry_hash` at `path`.
    ///
    /// The resulting state is not returned, read it back with
    /// [PaperzClient::get_state_machine_data].
    pub async fn step_state_machine(
        &self,
        path: &str,
        entry_hash: EntryHash,
        action: &str,
    ) -> ConductorApiResult<()> {
        let input = StepStateMachineInput {
            path: path.to_string(),
            entry_hash,
            action: action.to_string(),
        };
        self.call_zome("step_sm_remote", input).await
    }

    /// Every cell running in the node.
    pub async fn list_cell_ids(&self) -> ConductorApiResult<Vec<CellId>> {
        self.admin.list_cell_ids().await
    }

    /// Every active app in the node.
    pub async fn list_active_apps(&self) -> ConductorApiResult<Vec<InstalledAppId>> {
        self.admin.list_active_apps().await
    }
}

async fn discover_cell(
    app: &DynAppInterface,
    installed_app_id: &InstalledAppId,
) -> ConductorApiResult<CellId> {
    let info = app
        .app_info(installed_app_id.clone())
        .await?
        .ok_or_else(|| ConductorApiError::AppNotFound(installed_app_id.clone()))?;
    info.cell_data
        .into_iter()
        .next()
        .map(|cell| cell.cell_id)
        .ok_or_else(|| ConductorApiError::NoCellAvailable(installed_app_id.clone()))
}
