//! A fake node serving the app and admin interfaces over real websockets.
//!
//! It implements just enough of the paperz zome to exercise the client:
//! papers and annotations are kept in memory, state machine expressions
//! are stored verbatim and every zome call is recorded.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use holo_hash::{ActionHash, AgentPubKey, DnaHash, EntryHash};
use paperz_client::api::{
    AdminRequest, AdminResponse, AppRequest, AppResponse, CellId, ExternIO, ExternalApiWireError,
    InstalledAppInfo, InstalledAppInfoStatus, InstalledCell, ZomeCall,
};
use paperz_client::types::{
    Annotation, AnnotationOutput, Paper, PaperOutput, SensemakerEntry, SensemakerOutput,
    StateMachineInput, StepStateMachineInput,
};
use paperz_websocket::{ReceiveMessage, WebsocketConfig, WebsocketListener};
use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};

pub fn dna_hash(byte: u8) -> DnaHash {
    DnaHash::from_raw_36(vec![byte; 36])
}

pub fn agent_pubkey(byte: u8) -> AgentPubKey {
    AgentPubKey::from_raw_36(vec![byte; 36])
}

pub fn entry_hash(byte: u8) -> EntryHash {
    EntryHash::from_raw_36(vec![byte; 36])
}

pub fn action_hash(byte: u8) -> ActionHash {
    ActionHash::from_raw_36(vec![byte; 36])
}

/// The cell `(D1, A1)`.
pub fn cell_d1_a1() -> CellId {
    CellId::new(dna_hash(0xd1), agent_pubkey(0xa1))
}

/// What the node knows. Tests may read and seed it directly.
pub struct NodeState {
    pub apps: HashMap<String, Vec<CellId>>,
    pub other_cells: Vec<CellId>,
    pub sensemaker_cell: Option<CellId>,
    pub sm_init: HashMap<String, String>,
    pub sm_comp: HashMap<String, String>,
    pub sm_data: HashMap<EntryHash, String>,
    pub papers: Vec<PaperOutput>,
    pub annotations: Vec<AnnotationOutput>,
    /// Returned by every `upload_paper`.
    pub upload_action: ActionHash,
    pub calls: Vec<ZomeCall>,
    next_entry: u8,
}

impl NodeState {
    /// A node with `test-app` installed on the given cells.
    pub fn with_cells(cells: Vec<CellId>) -> Self {
        let mut apps = HashMap::new();
        apps.insert("test-app".to_string(), cells);
        Self {
            apps,
            other_cells: Vec::new(),
            sensemaker_cell: None,
            sm_init: HashMap::new(),
            sm_comp: HashMap::new(),
            sm_data: HashMap::new(),
            papers: Vec::new(),
            annotations: Vec::new(),
            upload_action: action_hash(0x11),
            calls: Vec::new(),
            next_entry: 0x20,
        }
    }

    /// A node with no apps at all.
    pub fn empty() -> Self {
        let mut state = Self::with_cells(Vec::new());
        state.apps.clear();
        state
    }

    pub fn calls_to(&self, fn_name: &str) -> Vec<ZomeCall> {
        self.calls
            .iter()
            .filter(|c| c.fn_name.as_str() == fn_name)
            .cloned()
            .collect()
    }

    fn fresh_entry_hash(&mut self) -> EntryHash {
        self.next_entry = self.next_entry.wrapping_add(1);
        entry_hash(self.next_entry)
    }

    fn handle_app(&mut self, request: AppRequest) -> AppResponse {
        match request {
            AppRequest::AppInfo { installed_app_id } => {
                let info = self.apps.get(&installed_app_id).map(|cells| InstalledAppInfo {
                    installed_app_id: installed_app_id.clone(),
                    cell_data: cells
                        .iter()
                        .map(|c| InstalledCell::new(c.clone(), "paperz"))
                        .collect(),
                    status: InstalledAppInfoStatus::Running,
                });
                AppResponse::AppInfo(info)
            }
            AppRequest::ZomeCall(call) => {
                self.calls.push((*call).clone());
                match self.handle_zome_call(&call) {
                    Ok(output) => AppResponse::ZomeCall(Box::new(output)),
                    Err(err) => AppResponse::Error(err),
                }
            }
        }
    }

    fn handle_zome_call(&mut self, call: &ZomeCall) -> Result<ExternIO, ExternalApiWireError> {
        match call.fn_name.as_str() {
            "set_sensemaker_cell_id" => {
                self.sensemaker_cell = Some(input(call)?);
                output(())
            }
            "get_sensemaker_cell_id" => output(self.sensemaker_cell.clone()),
            "get_all_paperz" => output(self.papers.clone()),
            "get_annotations_for_paper" => {
                let paper: EntryHash = input(call)?;
                let annotations: Vec<AnnotationOutput> = self
                    .annotations
                    .iter()
                    .filter(|(_, a)| a.paper_ref == paper)
                    .cloned()
                    .collect();
                output(annotations)
            }
            "upload_paper" => {
                // anything is accepted, only real papers are listed
                if let Ok(paper) = call.payload.decode::<Paper>() {
                    let hash = self.fresh_entry_hash();
                    self.papers.push((hash, paper));
                }
                output(self.upload_action.clone())
            }
            "create_annotation" => {
                let annotation: Annotation = input(call)?;
                let hash = self.fresh_entry_hash();
                self.annotations.push((hash.clone(), annotation));
                output((hash, action_hash(0x12)))
            }
            "get_state_machine_init" => {
                let path: String = input(call)?;
                output(self.sm_init.get(&path).map(|e| sensemaker_output(e)))
            }
            "get_state_machine_comp" => {
                let path: String = input(call)?;
                output(self.sm_comp.get(&path).map(|e| sensemaker_output(e)))
            }
            "get_state_machine_data" => {
                let target: EntryHash = input(call)?;
                output(self.sm_data.get(&target).map(|e| sensemaker_output(e)))
            }
            "set_state_machine_init" => {
                let StateMachineInput { path, expr } = input(call)?;
                output(store_expr(&mut self.sm_init, path, expr))
            }
            "set_state_machine_comp" => {
                let StateMachineInput { path, expr } = input(call)?;
                output(store_expr(&mut self.sm_comp, path, expr))
            }
            "step_sm_remote" => {
                let step: StepStateMachineInput = input(call)?;
                self.sm_data
                    .insert(step.entry_hash, format!("{}:{}", step.path, step.action));
                output(())
            }
            oth => Err(ExternalApiWireError::RibosomeError(format!(
                "no function named {oth}"
            ))),
        }
    }

    fn handle_admin(&self, request: AdminRequest) -> AdminResponse {
        match request {
            AdminRequest::ListCellIds => {
                let mut cells: Vec<CellId> = self.apps.values().flatten().cloned().collect();
                cells.extend(self.other_cells.iter().cloned());
                AdminResponse::CellIdsListed(cells)
            }
            AdminRequest::ListActiveApps => {
                AdminResponse::ActiveAppsListed(self.apps.keys().cloned().collect())
            }
        }
    }
}

/// Empty expressions are rejected.
fn store_expr(map: &mut HashMap<String, String>, path: String, expr: String) -> bool {
    if expr.trim().is_empty() {
        return false;
    }
    map.insert(path, expr);
    true
}

fn sensemaker_output(expr: &str) -> SensemakerOutput {
    (
        entry_hash(0x5e),
        SensemakerEntry {
            operator: String::new(),
            operands: Vec::new(),
            output_scheme: "string".to_string(),
            output_flat: expr.to_string(),
            start_gas: 0,
        },
    )
}

fn input<T: DeserializeOwned + Debug>(call: &ZomeCall) -> Result<T, ExternalApiWireError> {
    call.payload
        .decode()
        .map_err(|e| ExternalApiWireError::Deserialization(e.to_string()))
}

fn output<T: Serialize + Debug>(value: T) -> Result<ExternIO, ExternalApiWireError> {
    ExternIO::encode(value).map_err(ExternalApiWireError::internal)
}

pub struct MockNode {
    pub app_port: u16,
    pub admin_port: u16,
    pub state: Arc<Mutex<NodeState>>,
    tasks: Vec<tokio::task::AbortHandle>,
}

impl Drop for MockNode {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

impl MockNode {
    pub async fn start(state: NodeState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let config = Arc::new(WebsocketConfig::LISTENER_DEFAULT);
        let app = WebsocketListener::bind(config.clone(), "127.0.0.1:0")
            .await
            .unwrap();
        let admin = WebsocketListener::bind(config, "127.0.0.1:0")
            .await
            .unwrap();
        let app_port = app.local_addr().unwrap().port();
        let admin_port = admin.local_addr().unwrap().port();

        let app_task = tokio::task::spawn(serve(app, state.clone(), |state, req| {
            state.handle_app(req)
        }));
        let admin_task = tokio::task::spawn(serve(admin, state.clone(), |state, req| {
            state.handle_admin(req)
        }));

        Self {
            app_port,
            admin_port,
            state,
            tasks: vec![app_task.abort_handle(), admin_task.abort_handle()],
        }
    }
}

async fn serve<Req, Res, F>(listener: WebsocketListener, state: Arc<Mutex<NodeState>>, handle: F)
where
    Req: DeserializeOwned + Debug + Send + 'static,
    Res: Serialize + Debug + Send + 'static,
    F: Fn(&mut NodeState, Req) -> Res + Copy + Send + 'static,
{
    while let Ok((_tx, mut rx)) = listener.accept().await {
        let state = state.clone();
        tokio::task::spawn(async move {
            while let Ok(msg) = rx.recv::<Req>().await {
                if let ReceiveMessage::Request(request, respond) = msg {
                    let response = {
                        let mut state = state.lock();
                        handle(&mut *state, request)
                    };
                    if respond.respond(response).await.is_err() {
                        break;
                    }
                }
            }
        });
    }
}
